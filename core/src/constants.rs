//! Fixed geometry of the four-letter encoding plus config defaults.

/// Bytes per token.
pub const WORD_LEN: usize = 4;

/// Tokens in an alphabet; each stands for one 2-bit value.
pub const WORD_COUNT: usize = 4;

/// Bits carried by a single token.
pub const BITS_PER_WORD: u32 = 2;

/// Encoded bytes per decoded byte (4 tokens of 4 bytes).
pub const GROUP_LEN: usize = WORD_LEN * WORD_COUNT;

/// Length of an alphabet specification.
pub const ALPHABET_SPEC_LEN: usize = WORD_LEN * WORD_COUNT;

/// Cat noises.
pub const DEFAULT_ALPHABET_SPEC: &str = "meowmrowpurrmeww";

/// Initial scratch capacity for encoders and decoders.
pub const DEFAULT_SCRATCH_LEN: usize = 1024;

/// Scratch sanity bound (32 MiB). Decoder requests beyond it become short reads.
pub const MAX_SCRATCH_LEN: usize = 32 * 1024 * 1024;
