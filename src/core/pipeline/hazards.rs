//! Data Hazard Detection.
//!
//! This module implements the read-after-write dependency scan the fetch
//! unit runs before committing to an instruction. An instruction may not be
//! fetched while an in-flight instruction's destination operand appears
//! among its operands; the dependency resolves when the in-flight
//! instruction reaches write-back.
//!
//! Operand tokens are compared by normalized register identifier, not by
//! substring containment: `x1` does not collide with `x10`, and a memory
//! operand such as `8(x2)` depends on its base register `x2`.

use crate::isa::Instruction;

/// Extracts the register identifier a token reads or writes.
///
/// Memory-addressing operands of the form `imm(reg)` normalize to their
/// base register; any other token normalizes to itself.
///
/// # Arguments
///
/// * `token` - A single operand token with separators already stripped.
///
/// # Returns
///
/// The normalized identifier slice.
pub fn base_register(token: &str) -> &str {
    match token.find('(') {
        Some(open) => token[open + 1..].trim_end_matches(')'),
        None => token,
    }
}

/// Checks whether fetching `records[fetch_pos]` would violate a
/// read-after-write dependency on an in-flight instruction.
///
/// Scans every record between `writeback_pos` (inclusive) and `fetch_pos`
/// (exclusive). Counted branches are skipped: their operand resolution is
/// irrelevant to dependency checks. The scan window is empty when a taken
/// branch has relocated `fetch_pos` behind `writeback_pos`.
///
/// # Arguments
///
/// * `records` - The full instruction sequence.
/// * `writeback_pos` - Write-back stage cursor (oldest in-flight index).
/// * `fetch_pos` - Fetch stage cursor (candidate instruction index).
///
/// # Returns
///
/// `true` if fetch must stall until the blocking instruction retires.
pub fn raw_dependency(records: &[Instruction], writeback_pos: usize, fetch_pos: usize) -> bool {
    let candidate = &records[fetch_pos];

    for in_flight in records
        .iter()
        .take(fetch_pos)
        .skip(writeback_pos)
        .filter(|inst| !inst.kind().is_counted_branch())
    {
        let Some(dest) = in_flight.dest() else {
            continue;
        };
        let dest = base_register(dest);
        if dest.is_empty() {
            continue;
        }
        if candidate
            .operands()
            .map(base_register)
            .any(|operand| operand == dest)
        {
            return true;
        }
    }
    false
}
