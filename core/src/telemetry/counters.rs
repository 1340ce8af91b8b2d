//! telemetry/counters.rs
//! Mutable counters updated on every encode/decode call.
//!
//! Converted into an immutable `TelemetrySnapshot` on request.
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected while a stream instance runs.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Calls into the instance (`encode_chunk` / `decode_chunk`).
    pub calls: u64,
    /// Raw bytes: consumed by the encoder, or produced by the decoder.
    pub bytes_raw: u64,
    /// Encoded bytes: flushed by the encoder, or consumed by the decoder.
    pub bytes_encoded: u64,
    /// Bytes pulled from the source (decoder only).
    pub bytes_pulled: u64,
    /// Sink writes (encoder) or source reads (decoder).
    pub io_ops: u64,
    /// Decoder calls that produced no output and hit neither an error nor
    /// end-of-stream.
    pub zero_progress: u64,
}

impl TelemetryCounters {
    /// Record one encoder call.
    ///
    /// - `raw_len`: input bytes whose tokens were fully flushed
    /// - `encoded_len`: encoded bytes accepted by the sink
    /// - `sink_writes`: number of sink `write` calls it took
    pub fn add_encode(&mut self, raw_len: usize, encoded_len: usize, sink_writes: usize) {
        self.calls += 1;
        self.bytes_raw += raw_len as u64;
        self.bytes_encoded += encoded_len as u64;
        self.io_ops += sink_writes as u64;
    }

    /// Record one decoder call.
    ///
    /// - `raw_len`: decoded bytes handed to the caller
    /// - `encoded_len`: encoded bytes consumed into whole groups
    /// - `pulled_len`: bytes the single source read returned
    pub fn add_decode(&mut self, raw_len: usize, encoded_len: usize, pulled_len: usize) {
        self.calls += 1;
        self.io_ops += 1;
        self.bytes_raw += raw_len as u64;
        self.bytes_encoded += encoded_len as u64;
        self.bytes_pulled += pulled_len as u64;
        if raw_len == 0 {
            self.zero_progress += 1;
        }
    }

    /// Record a decoder call that ended without output: end-of-stream, or a
    /// bad word in the first group. Not counted as zero progress.
    pub fn add_decode_end(&mut self, pulled_len: usize) {
        self.calls += 1;
        self.io_ops += 1;
        self.bytes_pulled += pulled_len as u64;
    }

    /// Serialize with bincode's standard config, e.g. to ship counters
    /// out of process.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    /// Inverse of [`TelemetryCounters::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(counters)
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.calls += other.calls;
        self.bytes_raw += other.bytes_raw;
        self.bytes_encoded += other.bytes_encoded;
        self.bytes_pulled += other.bytes_pulled;
        self.io_ops += other.io_ops;
        self.zero_progress += other.zero_progress;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
