//! telemetry/mod.rs
//! Per-instance counters, stage timers and immutable snapshots.
//!
//! Every encoder and decoder keeps its own counters and timer under its
//! instance lock, so recording never contends across instances.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
