//! fourletter
//!
//! Encodes bytes as four-byte words and back. Each byte becomes four tokens
//! from a 16-byte alphabet (four distinct 4-byte words, two bits apiece),
//! so encoded output is exactly 16 times the input. Handy for making
//! arbitrary data look like a string of cat noises.
//!
//! ```
//! use fourletter::Alphabet;
//!
//! let alphabet = Alphabet::from_literal("boatfeetbowlsoap");
//! let encoded = alphabet.encode_to_string(b"hi").unwrap();
//! assert_eq!(encoded.len(), 32);
//! assert_eq!(alphabet.decode_str(&encoded).unwrap(), b"hi");
//! ```
//!
//! For streams, wrap a writer in [`StreamEncoder`] and a reader in
//! [`StreamDecoder`]; the decoder copes with reads that split words and
//! groups anywhere.

#![forbid(unsafe_code)]

pub mod constants;
pub mod types;
pub mod config;

pub mod alphabet;
pub mod codec;
pub mod telemetry;

// Stream layer
pub mod stream;

pub use alphabet::{Alphabet, Word};
pub use config::CodecConfig;
pub use stream::{ByteSource, DecodeProgress, Pull, StreamDecoder, StreamEncoder};
pub use types::FourLetterError;

// -----------------------------------------------------------------------------
// Prelude
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::alphabet::Alphabet;
    pub use crate::config::CodecConfig;
    pub use crate::stream::{ByteSource, DecodeProgress, Pull, StreamDecoder, StreamEncoder};
    pub use crate::types::FourLetterError;
}
