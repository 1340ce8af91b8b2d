//! Source capability consumed by the decoder.
//!
//! The sink side needs nothing beyond `std::io::Write`.

use std::io::{self, Read};

/// Outcome of one pull from a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// `n > 0` bytes were written to the front of the buffer.
    Data(usize),
    /// Nothing is ready yet; ask again later.
    Pending,
    /// The source is exhausted.
    Eof,
}

/// Anything the decoder can pull encoded bytes from.
///
/// Implemented for every `io::Read`: `Ok(0)` is end-of-stream, and
/// `WouldBlock`/`Interrupted` mean nothing is ready yet. Sources that can
/// tell "empty for now" from "finished" without those error kinds can
/// implement this directly.
pub trait ByteSource {
    /// Pull at most `buf.len()` bytes. `buf` is never empty.
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull>;
}

impl<R: Read> ByteSource for R {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull> {
        match self.read(buf) {
            Ok(0) => Ok(Pull::Eof),
            Ok(n) => Ok(Pull::Data(n)),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                Ok(Pull::Pending)
            }
            Err(e) => Err(e),
        }
    }
}
