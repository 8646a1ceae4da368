//! Fetch unit.
//!
//! Decides, once per cycle, whether the instruction at `fetch_pos` may be
//! committed to the pipeline, and if so where `fetch_pos` moves next. Fetch
//! stalls on execute-stage backpressure, on a read-after-write dependency
//! against an in-flight instruction, and on an unresolved jump or
//! condition-true counted branch; a stall is held until the write-back unit
//! releases it.
//!
//! The two counted-branch kinds are deliberately not mirror images of each
//! other: `bge` is taken once its counter has *reached* the threshold and
//! resets the counter on the taken path, while `ble` is taken until its
//! counter *exceeds* the threshold and increments the counter on the taken
//! path. The asymmetry is inherited behavior and must not be "fixed".

use tracing::trace;

use crate::common::SimError;
use crate::core::pipeline::{hazards, StageStatus};
use crate::core::Engine;
use crate::isa::{fields, OpClass};

pub fn fetch_stage(core: &mut Engine) -> Result<(), SimError> {
    let last = core.records.len() - 1;

    if core.state.execute_status.is_stalled() {
        // Execute-stage backpressure propagates upstream.
        core.state.fetch_status = StageStatus::Stalled;
    } else {
        if hazards::raw_dependency(&core.records, core.state.writeback_pos, core.state.fetch_pos) {
            trace!(pos = core.state.fetch_pos, "fetch held on operand dependency");
            core.state.fetch_status = StageStatus::Stalled;
            core.stats.stalls_data += 1;
            return Ok(());
        }

        // At most one unresolved jump (or condition-true branch) may be in
        // flight: the candidate waits until the instruction at write-back is
        // of its own kind.
        let kind = core.records[core.state.fetch_pos].kind();
        let wb_kind = core.records[core.state.writeback_pos].kind();
        let unresolved = match kind {
            OpClass::Jump => wb_kind != OpClass::Jump,
            OpClass::BranchGe => {
                counter(core, core.state.fetch_pos)? >= threshold(core, core.state.fetch_pos)?
                    && wb_kind != OpClass::BranchGe
            }
            OpClass::BranchLe => {
                counter(core, core.state.fetch_pos)? <= threshold(core, core.state.fetch_pos)?
                    && wb_kind != OpClass::BranchLe
            }
            _ => false,
        };
        if unresolved {
            trace!(pos = core.state.fetch_pos, "fetch held on control hazard");
            core.state.fetch_status = StageStatus::Stalled;
            core.stats.stalls_control += 1;
        }
    }

    if core.state.fetch_status.is_stalled() || core.state.fetch_pos >= last {
        return Ok(());
    }

    // Free to fetch: resolve the next fetch position by mnemonic.
    let pos = core.state.fetch_pos;
    match core.records[pos].kind() {
        OpClass::Jump => {
            core.state.fetch_pos = resolve_target(core, pos, core.records[pos].last_token())?;
            core.stats.jumps += 1;
        }
        OpClass::BranchGe => {
            // Taken once the counter has reached the threshold; the counter
            // resets on the taken path and counts up on the sequential path.
            let limit = threshold(core, pos)?;
            if counter(core, pos)? >= limit {
                set_counter(core, pos, 0)?;
                core.state.fetch_pos = branch_target(core, pos)?;
                core.stats.branches_taken += 1;
            } else {
                bump_counter(core, pos)?;
                core.state.fetch_pos += 1;
                core.stats.branches_not_taken += 1;
            }
        }
        OpClass::BranchLe => {
            // Taken until the counter exceeds the threshold; the counter
            // counts up on the taken path and resets on the sequential path.
            let limit = threshold(core, pos)?;
            if counter(core, pos)? <= limit {
                bump_counter(core, pos)?;
                core.state.fetch_pos = branch_target(core, pos)?;
                core.stats.branches_taken += 1;
            } else {
                set_counter(core, pos, 0)?;
                core.state.fetch_pos += 1;
                core.stats.branches_not_taken += 1;
            }
        }
        _ => core.state.fetch_pos += 1,
    }
    Ok(())
}

/// Reads the iteration counter of the branch at `pos`.
///
/// The loader registers an entry for every counted branch; a miss here is a
/// table-invariant violation, not a user error.
fn counter(core: &Engine, pos: usize) -> Result<i64, SimError> {
    core.counters
        .get(&pos)
        .copied()
        .ok_or_else(|| SimError::Internal(format!("no branch counter for instruction {pos}")))
}

fn set_counter(core: &mut Engine, pos: usize, value: i64) -> Result<(), SimError> {
    let entry = core
        .counters
        .get_mut(&pos)
        .ok_or_else(|| SimError::Internal(format!("no branch counter for instruction {pos}")))?;
    *entry = value;
    Ok(())
}

fn bump_counter(core: &mut Engine, pos: usize) -> Result<(), SimError> {
    let entry = core
        .counters
        .get_mut(&pos)
        .ok_or_else(|| SimError::Internal(format!("no branch counter for instruction {pos}")))?;
    *entry += 1;
    Ok(())
}

/// Reads the immediate threshold of the branch at `pos`.
fn threshold(core: &Engine, pos: usize) -> Result<i64, SimError> {
    let inst = &core.records[pos];
    let token = inst
        .token(fields::BRANCH_THRESHOLD)
        .ok_or_else(|| SimError::Internal(format!("instruction {pos} lacks a threshold operand")))?;
    token
        .parse()
        .map_err(|_| SimError::Internal(format!("instruction {pos} threshold `{token}` unparsable")))
}

/// Resolves the target label of the branch at `pos`.
fn branch_target(core: &Engine, pos: usize) -> Result<usize, SimError> {
    let target = core.records[pos]
        .token(fields::BRANCH_TARGET)
        .ok_or_else(|| SimError::Internal(format!("instruction {pos} lacks a target operand")))?;
    resolve_target(core, pos, target)
}

fn resolve_target(core: &Engine, pos: usize, label: &str) -> Result<usize, SimError> {
    core.symbols
        .get(label)
        .copied()
        .ok_or_else(|| SimError::UnknownLabel {
            line: pos + 1,
            label: label.to_string(),
        })
}
