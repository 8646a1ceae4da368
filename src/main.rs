//! Pipeline Timing Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, program loading, and the simulation run, then reports the total
//! clock count and run statistics.
//!
//! # Usage
//!
//! ```text
//! pipesim <program.s> [--config configs/default.toml] [--trace] [--json]
//! ```
//!
//! The reported `total_clock` is the driver's cycle count plus one, the
//! conventional extra cycle for the final pipeline drain step. A missing or
//! unreadable program file is not an error: it yields an empty program and a
//! report of one total clock.

use clap::Parser;
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use pipesim::config::Config;
use pipesim::core::Engine;
use pipesim::sim::loader;

/// Command-line arguments for the pipeline timing simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "3-stage pipeline timing simulator")]
struct Args {
    /// Assembly-like program to simulate.
    file: String,

    #[arg(short, long)]
    config: Option<String>,

    /// Print the per-cycle pipeline occupancy table to stderr.
    #[arg(long)]
    trace: bool,

    /// Emit run statistics as JSON instead of the formatted table.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => load_config(path),
        None => Config::default(),
    };
    if args.trace {
        config.general.trace_cycles = true;
    }

    let program = loader::load_program(&args.file).unwrap_or_else(|err| {
        eprintln!("\n[!] FATAL: {err}");
        process::exit(1);
    });

    let mut core = Engine::new(program, &config);
    let cycles = core.run().unwrap_or_else(|err| {
        eprintln!("\n[!] FATAL: {err}");
        process::exit(1);
    });

    println!("total_clock = {}", cycles + 1);

    if args.json {
        match serde_json::to_string_pretty(&core.stats) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("[!] stats serialization failed: {err}"),
        }
    } else if config.general.print_stats {
        core.stats.print();
    }
}

fn load_config(path: &str) -> Config {
    let content = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("\n[!] FATAL: Could not read config '{path}': {err}");
        process::exit(1);
    });
    toml::from_str(&content).unwrap_or_else(|err| {
        eprintln!("\n[!] FATAL: Could not parse config '{path}': {err}");
        process::exit(1);
    })
}
