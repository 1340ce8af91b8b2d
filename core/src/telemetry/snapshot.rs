//! telemetry/snapshot.rs
//! Immutable view of an instance's counters and timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::GROUP_LEN;
use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// `bytes_encoded / bytes_raw`; 16.0 for any stream that moved data.
    pub expansion_ratio: f64,
    pub throughput_raw_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let expansion_ratio = if counters.bytes_raw > 0 {
            counters.bytes_encoded as f64 / counters.bytes_raw as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_raw as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            expansion_ratio,
            throughput_raw_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Invariants every healthy instance satisfies:
    /// - exactly 16 encoded bytes per raw byte
    /// - stage time never exceeds wall time
    pub fn sanity_check(&self) -> bool {
        self.counters.bytes_encoded == self.counters.bytes_raw * GROUP_LEN as u64
            && self.stage_times.total() <= self.elapsed
    }

    /// Serialize as JSON for logs or dashboards.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
