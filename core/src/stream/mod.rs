//! Streaming transcoders.
//!
//! Responsibilities:
//! - Turn raw bytes into tokens on the way to a sink
//! - Turn tokens back into bytes from a source delivering arbitrary chunks,
//!   carrying partial groups between calls
//!
//! Non-responsibilities:
//! - Transport
//! - Framing or length prefixes

pub mod io;
pub mod encode;
pub mod decode;

pub use io::{ByteSource, Pull};
pub use encode::StreamEncoder;
pub use decode::{DecodeProgress, StreamDecoder};
