//! Execute unit.
//!
//! Models load/store-unit and memory-addressing latency as a single extra
//! cycle. The unit never computes anything: it either holds `exec_pos` for
//! one stall cycle or advances it to wherever fetch pointed at the end of
//! the previous cycle.

use crate::core::pipeline::StageStatus;
use crate::core::Engine;
use crate::isa::OpClass;

pub fn execute_stage(core: &mut Engine) {
    if core.state.execute_status.is_stalled() {
        // Latency cycle complete: absorb the bubble and resynchronize.
        core.state.execute_status = StageStatus::Free;
        core.state.exec_pos = core.state.fetch_pos;
        return;
    }

    let inst = &core.records[core.state.exec_pos];
    if inst.has_hex_immediate() || matches!(inst.kind(), OpClass::Load | OpClass::Store) {
        // One extra cycle for memory addressing or load/store-unit access.
        core.state.execute_status = StageStatus::Stalled;
        core.stats.stalls_mem += 1;
    } else {
        core.state.exec_pos = core.state.fetch_pos;
    }
}
