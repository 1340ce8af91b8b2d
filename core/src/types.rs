use std::io;

use thiserror::Error;

/// Unified error for alphabet construction, stream transcoding and the
/// one-shot helpers.
/// - `From<io::Error>` recovers a `FourLetterError` that travelled through an
///   `io::Read`/`io::Write` boundary, so `?` works across both.
#[derive(Debug, Error)]
pub enum FourLetterError {
    /// Alphabet specification is not exactly 16 bytes.
    #[error("invalid alphabet length: expected 16 bytes, got {len}")]
    InvalidAlphabetLength { len: usize },

    /// Two alphabet tokens are equal.
    #[error("duplicate alphabet token {:?} at indices {first} and {second}", .token.escape_ascii().to_string())]
    DuplicateToken {
        first: usize,
        second: usize,
        token: [u8; 4],
    },

    /// A 4-byte group in the encoded stream matches no alphabet token.
    #[error("invalid word {:?} at encoded offset {offset}", .word.escape_ascii().to_string())]
    InvalidWord { word: [u8; 4], offset: u64 },

    /// Buffer-mode decode input is not a multiple of 16 bytes.
    #[error("invalid source length: {len} is not a multiple of 16")]
    InvalidSourceLength { len: usize },

    /// Caller-supplied destination cannot hold the output.
    #[error("destination buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// The sink failed; `consumed` input bytes were fully flushed before it did.
    #[error("sink failed after {consumed} bytes were flushed: {source}")]
    Sink {
        consumed: usize,
        #[source]
        source: io::Error,
    },

    /// String output requested from an alphabet whose tokens are not UTF-8.
    #[error("alphabet tokens are not valid UTF-8")]
    NotUtf8Alphabet,

    /// Another caller panicked while holding the instance lock.
    #[error("stream state lock poisoned")]
    LockPoisoned,

    /// Configuration could not be parsed or is out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Source error, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl FourLetterError {
    /// True for errors that leave a decoder unusable.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FourLetterError::InvalidWord { .. })
    }

    /// Copy of a latched error, for replaying it on later calls.
    pub(crate) fn replay(&self) -> Option<Self> {
        match self {
            FourLetterError::InvalidWord { word, offset } => Some(FourLetterError::InvalidWord {
                word: *word,
                offset: *offset,
            }),
            _ => None,
        }
    }
}

impl From<io::Error> for FourLetterError {
    fn from(e: io::Error) -> Self {
        // Unwrap errors this crate boxed into an io::Error on the way out.
        if !e.get_ref().is_some_and(|inner| inner.is::<FourLetterError>()) {
            return FourLetterError::Io(e);
        }
        let kind = e.kind();
        match e.into_inner().map(|inner| inner.downcast::<FourLetterError>()) {
            Some(Ok(ours)) => *ours,
            Some(Err(other)) => FourLetterError::Io(io::Error::new(kind, other)),
            None => FourLetterError::Io(kind.into()),
        }
    }
}

impl From<FourLetterError> for io::Error {
    fn from(e: FourLetterError) -> Self {
        match e {
            FourLetterError::Io(inner) => inner,
            FourLetterError::Sink { ref source, .. } => {
                let kind = source.kind();
                io::Error::new(kind, e)
            }
            FourLetterError::BufferTooSmall { .. } | FourLetterError::Config(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for FourLetterError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        FourLetterError::LockPoisoned
    }
}

impl From<serde_json::Error> for FourLetterError {
    fn from(e: serde_json::Error) -> Self {
        FourLetterError::Config(e.to_string())
    }
}
