//! Cycle driver and engine state.

use std::collections::HashMap;

use crate::common::SimError;
use crate::config::Config;
use crate::core::pipeline::PipelineState;
use crate::core::stages;
use crate::isa::Instruction;
use crate::sim::Program;
use crate::stats::SimStats;

/// The 3-stage pipeline engine.
///
/// Owns the loader's three tables and the pipeline state. `records` and
/// `symbols` are never mutated after construction; `counters` is written
/// only by the fetch unit.
pub struct Engine {
    /// Instruction records in source order. Read-only.
    pub records: Vec<Instruction>,
    /// Label text to instruction index. Read-only.
    pub symbols: HashMap<String, usize>,
    /// Branch iteration counters, keyed by instruction index. The fetch
    /// unit is the sole mutator.
    pub counters: HashMap<usize, i64>,
    /// Stage cursors and statuses.
    pub state: PipelineState,
    /// Simulation statistics.
    pub stats: SimStats,
    /// Emit the per-cycle trace table on stderr.
    pub trace: bool,
}

impl Engine {
    /// Builds an engine over a loaded program.
    pub fn new(program: Program, config: &Config) -> Self {
        Self {
            records: program.records,
            symbols: program.symbols,
            counters: program.counters,
            state: PipelineState::default(),
            stats: SimStats::default(),
            trace: config.general.trace_cycles,
        }
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// The stage order is a contract, not an implementation detail:
    /// write-back runs first and consumes the execute cursor as it stood at
    /// the end of the previous cycle, execute then overwrites that cursor
    /// from the fetch cursor, and fetch reads and updates last. This yields
    /// shift-register semantics across the three stages without
    /// double-buffered state.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.records.is_empty() {
            return Ok(());
        }
        stages::writeback_stage(self);
        stages::execute_stage(self);
        stages::fetch_stage(self)
    }

    /// Runs the pipeline until the last instruction reaches write-back.
    ///
    /// # Returns
    ///
    /// The number of completed cycles, or 0 for an empty program. The
    /// conventional +1 drain cycle is left to the caller's report.
    pub fn run(&mut self) -> Result<u64, SimError> {
        if self.records.is_empty() {
            return Ok(0);
        }
        let last = self.records.len() - 1;
        let mut cycles = 0u64;

        while self.state.writeback_pos != last {
            if self.trace {
                self.trace_cycle(cycles);
            }
            self.tick()?;
            cycles += 1;
        }
        if self.trace {
            self.trace_cycle(cycles);
        }

        self.stats.cycles = cycles;
        Ok(cycles)
    }

    fn trace_cycle(&self, cycle: u64) {
        eprintln!(
            "{:<6} IF={:<8} EX={:<8} WB={:<8} {:?}/{:?}",
            cycle,
            self.mnemonic_at(self.state.fetch_pos),
            self.mnemonic_at(self.state.exec_pos),
            self.mnemonic_at(self.state.writeback_pos),
            self.state.fetch_status,
            self.state.execute_status,
        );
    }

    fn mnemonic_at(&self, pos: usize) -> &str {
        self.records.get(pos).map_or("-", Instruction::mnemonic)
    }
}
