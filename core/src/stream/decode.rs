//! Streaming decoder: every 16 encoded bytes become one byte.
//!
//! The source may hand back any number of bytes per read, so a call can end
//! in the middle of a group. Those bytes (never more than 15) are kept as
//! leftover and placed in front of the next read.

use std::io::{self, Read};
use std::sync::Mutex;

use tracing::{debug, trace, warn};

use crate::alphabet::Alphabet;
use crate::config::CodecConfig;
use crate::constants::{BITS_PER_WORD, GROUP_LEN, WORD_LEN};
use crate::stream::io::{ByteSource, Pull};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::FourLetterError;

/// Result of one [`StreamDecoder::decode_chunk`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeProgress {
    /// Bytes written to the front of the destination.
    pub decoded: usize,
    /// Bytes the source returned on this call.
    pub pulled: usize,
    /// The source reported end-of-stream.
    pub eof: bool,
}

impl DecodeProgress {
    /// Nothing decoded and the stream is not over: try again later.
    pub fn is_pending(&self) -> bool {
        self.decoded == 0 && !self.eof
    }
}

/// Decodes tokens pulled from a source.
///
/// Calls on one instance are serialized by an internal lock. After an
/// invalid word the decoder is dead: every later call returns the same
/// error without reading the source.
pub struct StreamDecoder<R> {
    alphabet: Alphabet,
    /// Largest scratch request, a multiple of 16.
    scratch_limit: usize,
    state: Mutex<DecoderState<R>>,
}

struct DecoderState<R> {
    source: R,
    scratch: Vec<u8>,
    leftover: [u8; GROUP_LEN],
    nleftover: usize,
    /// Encoded bytes consumed into whole groups so far.
    consumed: u64,
    failed: Option<FourLetterError>,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl<R: ByteSource> StreamDecoder<R> {
    pub fn new(alphabet: Alphabet, source: R) -> Self {
        Self::with_config(alphabet, source, &CodecConfig::default())
    }

    /// Decoder with scratch sizing taken from `config`.
    pub fn with_config(alphabet: Alphabet, source: R, config: &CodecConfig) -> Self {
        Self {
            alphabet,
            scratch_limit: config.scratch_limit(),
            state: Mutex::new(DecoderState {
                source,
                scratch: vec![0u8; config.scratch_len.min(config.scratch_limit())],
                leftover: [0u8; GROUP_LEN],
                nleftover: 0,
                consumed: 0,
                failed: None,
                counters: TelemetryCounters::default(),
                timer: TelemetryTimer::new(),
            }),
        }
    }

    /// Decode up to `dst.len()` bytes using exactly one source read.
    ///
    /// Leftover bytes from the previous call go first, then one read tops
    /// the scratch up to `16 * dst.len()` bytes. Whole groups are decoded
    /// into `dst`; the remainder becomes the new leftover.
    ///
    /// A source with nothing ready, or a read too short to finish a group,
    /// yields zero progress and no error. That is not end-of-stream.
    ///
    /// A bad token stops decoding at its group. Bytes decoded before it in
    /// the same call are returned first, and the error comes on the next
    /// call.
    ///
    /// # Errors
    /// - `InvalidWord` if a token is not in the alphabet; terminal
    /// - `Io` for source errors, passed through; leftover is kept
    pub fn decode_chunk(&self, dst: &mut [u8]) -> Result<DecodeProgress, FourLetterError> {
        let mut guard = self.state.lock()?;
        let state = &mut *guard;

        if let Some(err) = state.failed.as_ref().and_then(FourLetterError::replay) {
            return Err(err);
        }
        if dst.is_empty() {
            return Ok(DecodeProgress::default());
        }

        let want = dst
            .len()
            .saturating_mul(GROUP_LEN)
            .min(self.scratch_limit);
        if state.scratch.len() < want {
            debug!(from = state.scratch.len(), to = want, "growing decoder scratch");
            state.scratch.resize(want, 0);
        }

        let nl = state.nleftover;
        state.scratch[..nl].copy_from_slice(&state.leftover[..nl]);

        let pulled = match state
            .timer
            .time(Stage::Read, || state.source.pull(&mut state.scratch[nl..want]))?
        {
            Pull::Data(n) => n,
            Pull::Pending => {
                state.counters.add_decode(0, 0, 0);
                trace!(leftover = nl, "source pending");
                return Ok(DecodeProgress::default());
            }
            Pull::Eof => {
                state.counters.add_decode_end(0);
                if nl > 0 {
                    warn!(leftover = nl, "end of stream inside a group; trailing bytes ignored");
                } else {
                    debug!(consumed = state.consumed, "end of stream");
                }
                return Ok(DecodeProgress {
                    decoded: 0,
                    pulled: 0,
                    eof: true,
                });
            }
        };

        let filled = nl + pulled;
        let groups = filled / GROUP_LEN;
        let used = groups * GROUP_LEN;

        let alphabet = &self.alphabet;
        let base = state.consumed;
        let (good, failure) = state.timer.time(Stage::Decode, || {
            decode_groups(alphabet, &state.scratch[..used], &mut dst[..groups], base)
        });
        if let Some(err) = failure {
            warn!(error = %err, decoded = good, "invalid word in encoded stream");
            state.failed = err.replay();
            state.nleftover = 0;
            state.consumed += (good * GROUP_LEN) as u64;
            if good == 0 {
                state.counters.add_decode_end(pulled);
                return Err(err);
            }
            state.counters.add_decode(good, good * GROUP_LEN, pulled);
            return Ok(DecodeProgress {
                decoded: good,
                pulled,
                eof: false,
            });
        }

        let rest = filled - used;
        state.leftover[..rest].copy_from_slice(&state.scratch[used..filled]);
        state.nleftover = rest;
        state.consumed += used as u64;
        state.counters.add_decode(groups, used, pulled);
        trace!(pulled, decoded = groups, leftover = rest, "decoded chunk");

        Ok(DecodeProgress {
            decoded: groups,
            pulled,
            eof: false,
        })
    }

    /// Fill `dst` by calling [`decode_chunk`](Self::decode_chunk) until it
    /// is full or the source ends.
    ///
    /// End-of-stream is success. Returns the number of bytes written, which
    /// is less than `dst.len()` only if the stream ended first. Errors are
    /// returned as soon as they happen.
    pub fn decode_into(&self, dst: &mut [u8]) -> Result<usize, FourLetterError> {
        let mut total = 0;
        while total < dst.len() {
            let progress = self.decode_chunk(&mut dst[total..])?;
            total += progress.decoded;
            if progress.eof {
                break;
            }
        }
        Ok(total)
    }

    /// Bytes of an unfinished group waiting for the next call.
    pub fn leftover_len(&self) -> Result<usize, FourLetterError> {
        Ok(self.state.lock()?.nleftover)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Counters and stage timings so far.
    pub fn telemetry(&self) -> Result<TelemetrySnapshot, FourLetterError> {
        let state = self.state.lock()?;
        Ok(TelemetrySnapshot::from(&state.counters, &state.timer))
    }

    /// Give back the source. Leftover bytes are dropped.
    pub fn into_inner(self) -> Result<R, FourLetterError> {
        Ok(self.state.into_inner()?.source)
    }
}

/// Decode whole groups from `src` into `dst`, one byte per 16 bytes.
///
/// Returns the number of bytes written and the error that stopped it, if
/// any. `base` is the stream offset of `src[0]`, used to locate bad words.
pub(crate) fn decode_groups(
    alphabet: &Alphabet,
    src: &[u8],
    dst: &mut [u8],
    base: u64,
) -> (usize, Option<FourLetterError>) {
    let mut done = 0;
    for (group, out) in src.chunks_exact(GROUP_LEN).zip(dst.iter_mut()) {
        let mut byte = 0u8;
        for (w, word) in group.chunks_exact(WORD_LEN).enumerate() {
            let Some(value) = alphabet.decode_token(word) else {
                let mut bad = [0u8; WORD_LEN];
                bad.copy_from_slice(word);
                let err = FourLetterError::InvalidWord {
                    word: bad,
                    offset: base + (done * GROUP_LEN + w * WORD_LEN) as u64,
                };
                return (done, Some(err));
            };
            byte = (byte >> BITS_PER_WORD) | (value << (8 - BITS_PER_WORD));
        }
        *out = byte;
        done += 1;
    }
    (done, None)
}

impl<R: ByteSource> Read for &StreamDecoder<R> {
    /// Zero progress is never reported as `Ok(0)`, which means
    /// end-of-stream here: a short read that left bytes in the leftover
    /// gives `Interrupted` (retry now), a source with nothing ready gives
    /// `WouldBlock`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let progress = self.decode_chunk(buf)?;
        if progress.decoded > 0 || progress.eof {
            return Ok(progress.decoded);
        }
        if progress.pulled > 0 {
            Err(io::Error::new(io::ErrorKind::Interrupted, "partial group buffered"))
        } else {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "source has no data ready"))
        }
    }
}

impl<R: ByteSource> Read for StreamDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&*self).read(buf)
    }
}
