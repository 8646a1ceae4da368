//! Pipeline engine core.
//!
//! The engine owns the loader's three tables and the pipeline state, and
//! drives one cycle per `tick`: write-back, then execute, then fetch, in
//! that fixed order.

/// Cycle driver and engine state.
pub mod engine;

/// Pipeline cursors, stage statuses, and hazard detection.
pub mod pipeline;

/// Pipeline stage implementations (fetch, execute, write-back).
pub mod stages;

pub use engine::Engine;
