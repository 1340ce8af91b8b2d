//! Streaming encoder: every input byte becomes 16 encoded bytes.

use std::io::{self, Write};
use std::sync::Mutex;

use tracing::{debug, trace, warn};

use crate::alphabet::Alphabet;
use crate::config::CodecConfig;
use crate::constants::{BITS_PER_WORD, DEFAULT_SCRATCH_LEN, GROUP_LEN, WORD_COUNT, WORD_LEN};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::FourLetterError;

/// Encodes bytes into tokens and writes them to a sink.
///
/// Calls on one instance are serialized by an internal lock, so a shared
/// `&StreamEncoder` can be written from several threads; each call's output
/// reaches the sink contiguously. Nothing is buffered between calls.
pub struct StreamEncoder<W> {
    alphabet: Alphabet,
    state: Mutex<EncoderState<W>>,
}

struct EncoderState<W> {
    sink: W,
    /// Sized to the largest request seen so far; never shrinks.
    scratch: Vec<u8>,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl<W: Write> StreamEncoder<W> {
    pub fn new(alphabet: Alphabet, sink: W) -> Self {
        Self::with_scratch_len(alphabet, sink, DEFAULT_SCRATCH_LEN)
    }

    /// Encoder whose scratch starts at `config.scratch_len` bytes.
    pub fn with_config(alphabet: Alphabet, sink: W, config: &CodecConfig) -> Self {
        Self::with_scratch_len(alphabet, sink, config.scratch_len)
    }

    fn with_scratch_len(alphabet: Alphabet, sink: W, scratch_len: usize) -> Self {
        Self {
            alphabet,
            state: Mutex::new(EncoderState {
                sink,
                scratch: Vec::with_capacity(scratch_len),
                counters: TelemetryCounters::default(),
                timer: TelemetryTimer::new(),
            }),
        }
    }

    /// Encode `src` and write all of it to the sink.
    ///
    /// Returns `src.len()` once every encoded byte has been accepted.
    ///
    /// # Errors
    /// - `Sink { consumed, .. }` if the sink fails; `consumed` counts the
    ///   input bytes whose 16 encoded bytes were all flushed first. Tokens
    ///   of the byte after them may already be in the sink.
    /// - `InvalidSourceLength` if `16 * src.len()` overflows `usize`
    pub fn encode_chunk(&self, src: &[u8]) -> Result<usize, FourLetterError> {
        let mut guard = self.state.lock()?;
        let state = &mut *guard;

        let need = src
            .len()
            .checked_mul(GROUP_LEN)
            .ok_or(FourLetterError::InvalidSourceLength { len: src.len() })?;
        if need == 0 {
            return Ok(0);
        }

        if state.scratch.len() < need {
            debug!(from = state.scratch.len(), to = need, "growing encoder scratch");
            state.scratch.resize(need, 0);
        }

        let alphabet = &self.alphabet;
        state
            .timer
            .time(Stage::Encode, || encode_groups(alphabet, src, &mut state.scratch[..need]));

        let (flushed, writes, failure) = state
            .timer
            .time(Stage::Write, || drain(&mut state.sink, &state.scratch[..need]));

        let consumed = flushed / GROUP_LEN;
        state.counters.add_encode(consumed, flushed, writes);
        trace!(src_len = src.len(), flushed, writes, "encoded chunk");

        match failure {
            None => Ok(src.len()),
            Some(source) => {
                if flushed % GROUP_LEN != 0 {
                    warn!(
                        consumed,
                        torn = flushed % GROUP_LEN,
                        "sink failed mid-group; partial tokens already written"
                    );
                }
                Err(FourLetterError::Sink { consumed, source })
            }
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Counters and stage timings so far.
    pub fn telemetry(&self) -> Result<TelemetrySnapshot, FourLetterError> {
        let state = self.state.lock()?;
        Ok(TelemetrySnapshot::from(&state.counters, &state.timer))
    }

    /// Give back the sink.
    pub fn into_inner(self) -> Result<W, FourLetterError> {
        Ok(self.state.into_inner()?.sink)
    }
}

/// Write four tokens per input byte into `out`, low bit pair first.
/// `out` must be exactly `16 * src.len()` bytes.
pub(crate) fn encode_groups(alphabet: &Alphabet, src: &[u8], out: &mut [u8]) {
    for (&byte, group) in src.iter().zip(out.chunks_exact_mut(GROUP_LEN)) {
        let mut value = byte;
        for word in group.chunks_exact_mut(WORD_LEN).take(WORD_COUNT) {
            word.copy_from_slice(alphabet.encode_value(value));
            value >>= BITS_PER_WORD;
        }
    }
}

/// Push all of `buf` into `sink`.
///
/// Returns bytes accepted, `write` calls made, and the error that stopped
/// it, if any.
fn drain<W: Write>(sink: &mut W, buf: &[u8]) -> (usize, usize, Option<io::Error>) {
    let mut off = 0;
    let mut writes = 0;
    while off < buf.len() {
        writes += 1;
        match sink.write(&buf[off..]) {
            Ok(0) => {
                let e = io::Error::new(io::ErrorKind::WriteZero, "sink accepted no bytes");
                return (off, writes, Some(e));
            }
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return (off, writes, Some(e)),
        }
    }
    (off, writes, None)
}

impl<W: Write> Write for &StreamEncoder<W> {
    /// A sink failure is always an error, even after some bytes went out:
    /// the sink may hold part of the next byte's tokens, so retrying the
    /// rest of `buf` would misalign the stream. The error keeps the sink's
    /// kind and converts back into `FourLetterError::Sink { consumed, .. }`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.encode_chunk(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.state.lock().map_err(FourLetterError::from)?;
        state.sink.flush()
    }
}

impl<W: Write> Write for StreamEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}
