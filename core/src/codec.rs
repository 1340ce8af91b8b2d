//! codec.rs
//! One-shot helpers on `Alphabet`: whole buffers and strings in, out.
//!
//! Sizes are checked up front; the work is done by the same routines the
//! streaming encoder and decoder use, over in-memory sinks and sources.

use std::io::Write;

use crate::alphabet::Alphabet;
use crate::constants::GROUP_LEN;
use crate::stream::{StreamDecoder, StreamEncoder};
use crate::types::FourLetterError;

impl Alphabet {
    /// Encode `src` into the front of `dst`. Returns bytes written,
    /// always `16 * src.len()`.
    ///
    /// # Errors
    /// - `BufferTooSmall` if `dst` is shorter than `16 * src.len()`
    pub fn encode(&self, dst: &mut [u8], src: &[u8]) -> Result<usize, FourLetterError> {
        let needed = encoded_len(src.len())?;
        if dst.len() < needed {
            return Err(FourLetterError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        StreamEncoder::new(*self, &mut dst[..needed]).encode_chunk(src)?;
        Ok(needed)
    }

    /// Encode `src` into a new buffer.
    ///
    /// # Errors
    /// - `InvalidSourceLength` if `16 * src.len()` overflows `usize`
    pub fn encode_to_vec(&self, src: &[u8]) -> Result<Vec<u8>, FourLetterError> {
        let mut out = vec![0u8; encoded_len(src.len())?];
        crate::stream::encode::encode_groups(self, src, &mut out);
        Ok(out)
    }

    /// Encode `src` as a string.
    ///
    /// # Errors
    /// - `NotUtf8Alphabet` if a token is not valid UTF-8 by itself
    pub fn encode_to_string(&self, src: &[u8]) -> Result<String, FourLetterError> {
        if !self.is_utf8() {
            return Err(FourLetterError::NotUtf8Alphabet);
        }
        String::from_utf8(self.encode_to_vec(src)?).map_err(|_| FourLetterError::NotUtf8Alphabet)
    }

    /// Encode `src` straight into `dst`, stopping at its first error.
    /// Returns how many bytes of `src` were fully written.
    pub fn encode_to_writer<W: Write>(&self, dst: W, src: &[u8]) -> Result<usize, FourLetterError> {
        StreamEncoder::new(*self, dst).encode_chunk(src)
    }

    /// Decode `src` into the front of `dst`. Returns bytes written,
    /// always `src.len() / 16`.
    ///
    /// # Errors
    /// - `InvalidSourceLength` if `src.len()` is not a multiple of 16
    /// - `BufferTooSmall` if `dst` is shorter than `src.len() / 16`
    /// - `InvalidWord` if `src` holds a word outside the alphabet
    pub fn decode(&self, dst: &mut [u8], src: &[u8]) -> Result<usize, FourLetterError> {
        let needed = decoded_len(src.len())?;
        if dst.len() < needed {
            return Err(FourLetterError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        StreamDecoder::new(*self, src).decode_into(&mut dst[..needed])
    }

    /// Decode `src` into a new buffer.
    pub fn decode_to_vec(&self, src: &[u8]) -> Result<Vec<u8>, FourLetterError> {
        let mut out = vec![0u8; decoded_len(src.len())?];
        let n = StreamDecoder::new(*self, src).decode_into(&mut out)?;
        out.truncate(n);
        Ok(out)
    }

    /// Decode an encoded string.
    pub fn decode_str(&self, s: &str) -> Result<Vec<u8>, FourLetterError> {
        self.decode_to_vec(s.as_bytes())
    }
}

/// Encoded size of `len` raw bytes.
pub fn encoded_len(len: usize) -> Result<usize, FourLetterError> {
    len.checked_mul(GROUP_LEN)
        .ok_or(FourLetterError::InvalidSourceLength { len })
}

/// Decoded size of `len` encoded bytes; `len` must be a whole number of groups.
pub fn decoded_len(len: usize) -> Result<usize, FourLetterError> {
    if len % GROUP_LEN != 0 {
        return Err(FourLetterError::InvalidSourceLength { len });
    }
    Ok(len / GROUP_LEN)
}
