//! Simulation statistics collection and reporting.
//!
//! Tracks cycle counts, retired instructions, stall causes, and branch
//! outcomes during simulation execution.

use serde::Serialize;

/// Counters collected over one simulation run.
#[derive(Debug, Default, Serialize)]
pub struct SimStats {
    /// Total clock cycles counted by the cycle driver.
    pub cycles: u64,
    /// Write-back cursor advances (the pipeline-fill cycle and repeated
    /// visits under stall are not counted).
    pub instructions_retired: u64,

    /// Cycles fetch was held on an operand dependency.
    pub stalls_data: u64,
    /// Cycles fetch was held on an unresolved jump or branch.
    pub stalls_control: u64,
    /// Latency cycles spent in the execute unit on load/store or
    /// memory-addressing access.
    pub stalls_mem: u64,

    /// Counted-branch resolutions that jumped.
    pub branches_taken: u64,
    /// Counted-branch resolutions that fell through.
    pub branches_not_taken: u64,
    /// Unconditional jumps resolved.
    pub jumps: u64,
}

impl SimStats {
    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;

        println!("\n==========================================================");
        println!("PIPELINE TIMING STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!(
            "sim_ipc                  {:.4}",
            self.instructions_retired as f64 / cyc as f64
        );
        println!("----------------------------------------------------------");
        println!("STALL BREAKDOWN");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data)
        );
        println!(
            "  stalls.control         {} ({:.2}%)",
            self.stalls_control,
            pct(self.stalls_control)
        );
        println!(
            "  stalls.memory          {} ({:.2}%)",
            self.stalls_mem,
            pct(self.stalls_mem)
        );
        println!("----------------------------------------------------------");
        println!("CONTROL FLOW");
        println!("  branches.taken         {}", self.branches_taken);
        println!("  branches.not_taken     {}", self.branches_not_taken);
        println!("  jumps                  {}", self.jumps);
        println!("==========================================================");
    }
}
