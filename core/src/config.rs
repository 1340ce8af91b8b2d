//! config.rs
//! Codec configuration: which alphabet, and how big scratch space may get.

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::constants::{DEFAULT_ALPHABET_SPEC, DEFAULT_SCRATCH_LEN, GROUP_LEN, MAX_SCRATCH_LEN};
use crate::types::FourLetterError;

/// Settings shared by encoders and decoders.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// 16-byte alphabet specification.
    pub alphabet: String,
    /// Initial scratch capacity in bytes.
    pub scratch_len: usize,
    /// Upper bound on decoder scratch; larger requests become short reads.
    pub max_scratch_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET_SPEC.to_owned(),
            scratch_len: DEFAULT_SCRATCH_LEN,
            max_scratch_len: MAX_SCRATCH_LEN,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, FourLetterError> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs no instance could run with.
    pub fn validate(&self) -> Result<(), FourLetterError> {
        if self.max_scratch_len < GROUP_LEN {
            return Err(FourLetterError::Config(format!(
                "max_scratch_len {} is below one group ({} bytes)",
                self.max_scratch_len, GROUP_LEN
            )));
        }
        if self.scratch_len > self.max_scratch_len {
            return Err(FourLetterError::Config(format!(
                "scratch_len {} exceeds max_scratch_len {}",
                self.scratch_len, self.max_scratch_len
            )));
        }
        self.alphabet().map(|_| ())
    }

    /// Build the configured alphabet.
    pub fn alphabet(&self) -> Result<Alphabet, FourLetterError> {
        Alphabet::new(&self.alphabet)
    }

    /// Largest decoder scratch request, rounded down to whole groups.
    pub(crate) fn scratch_limit(&self) -> usize {
        (self.max_scratch_len / GROUP_LEN).max(1) * GROUP_LEN
    }
}
