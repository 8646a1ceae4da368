//! Write-back unit.
//!
//! Runs first in the cycle, so the execute cursor it reads still holds its
//! value from the end of the previous cycle. When the instruction that
//! caused a stall reaches write-back, the hazard it posed is resolved and
//! fetch is released.

use crate::core::pipeline::StageStatus;
use crate::core::Engine;

pub fn writeback_stage(core: &mut Engine) {
    if core.state.writeback_pos == core.state.exec_pos
        && (core.state.fetch_status.is_stalled() || core.state.execute_status.is_stalled())
    {
        core.state.fetch_status = StageStatus::Free;
    }

    if core.state.writeback_pos != core.state.exec_pos {
        core.stats.instructions_retired += 1;
    }
    core.state.writeback_pos = core.state.exec_pos;
}
