// Streaming encode: whole-byte accounting and per-call serialization.

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use std::thread;

    use fourletter::{Alphabet, CodecConfig, FourLetterError, StreamEncoder};

    const ABCD: Alphabet = Alphabet::from_literal("aaaabbbbccccdddd");

    /// Accepts `budget` bytes in pieces of at most `piece`, then fails.
    struct Leaky {
        out: Vec<u8>,
        budget: usize,
        piece: usize,
    }

    impl Write for Leaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget).min(self.piece);
            self.out.extend_from_slice(&buf[..n]);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Cloneable sink so threads can share one buffer behind the encoder.
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            // Dribble bytes out to give other writers a chance to interleave.
            let n = buf.len().min(7);
            self.0.lock().unwrap().extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_consumes_everything() {
        let enc = StreamEncoder::new(ABCD, Vec::new());
        assert_eq!(enc.encode_chunk(b"ls ").unwrap(), 3);
        assert_eq!(enc.encode_chunk(b"-lart").unwrap(), 5);
        let out = enc.into_inner().unwrap();
        assert_eq!(out, ABCD.encode_to_vec(b"ls -lart").unwrap());
    }

    #[test]
    fn empty_write_is_a_no_op() {
        let enc = StreamEncoder::new(ABCD, Leaky { out: Vec::new(), budget: 0, piece: 1 });
        assert_eq!(enc.encode_chunk(&[]).unwrap(), 0);
    }

    #[test]
    fn short_sink_writes_are_drained() {
        let sink = Leaky { out: Vec::new(), budget: usize::MAX, piece: 5 };
        let enc = StreamEncoder::new(ABCD, sink);
        assert_eq!(enc.encode_chunk(&[0x00, 0xFF]).unwrap(), 2);
        let sink = enc.into_inner().unwrap();
        assert_eq!(sink.out, b"aaaaaaaaaaaaaaaadddddddddddddddd");
    }

    #[test]
    fn sink_failure_counts_whole_bytes_only() {
        // 40 bytes fit: two whole groups and half of the third.
        let sink = Leaky { out: Vec::new(), budget: 40, piece: 64 };
        let enc = StreamEncoder::new(ABCD, sink);
        match enc.encode_chunk(b"abcd") {
            Err(FourLetterError::Sink { consumed, source }) => {
                assert_eq!(consumed, 2);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("expected Sink error, got {other:?}"),
        }
    }

    /// Accepts `first` bytes, fails once, then accepts everything.
    struct Hiccup {
        out: Vec<u8>,
        first: usize,
        failed: bool,
    }

    impl Write for Hiccup {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.first.saturating_sub(self.out.len());
            if room == 0 && !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::TimedOut, "stalled"));
            }
            let n = if self.failed { buf.len() } else { buf.len().min(room) };
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_write_surfaces_error_after_whole_bytes() {
        let sink = Leaky { out: Vec::new(), budget: 32, piece: 64 };
        let mut enc = StreamEncoder::new(ABCD, sink);
        let err = enc.write(b"abc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(matches!(
            FourLetterError::from(err),
            FourLetterError::Sink { consumed: 2, .. }
        ));
    }

    #[test]
    fn sink_failure_mid_group_is_never_retried() {
        let sink = Hiccup { out: Vec::new(), first: 20, failed: false };
        let enc = StreamEncoder::new(ABCD, sink);
        match enc.encode_chunk(b"ab") {
            Err(FourLetterError::Sink { consumed, source }) => {
                assert_eq!(consumed, 1);
                assert_eq!(source.kind(), io::ErrorKind::TimedOut);
            }
            other => panic!("expected Sink error, got {other:?}"),
        }
        // Torn tokens of the second byte are already out.
        assert_eq!(enc.into_inner().unwrap().out.len(), 20);
    }

    #[test]
    fn write_all_stops_on_torn_group() {
        let sink = Hiccup { out: Vec::new(), first: 20, failed: false };
        let mut enc = StreamEncoder::new(ABCD, sink);
        let err = enc.write_all(b"ab").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        match FourLetterError::from(err) {
            FourLetterError::Sink { consumed, .. } => assert_eq!(consumed, 1),
            other => panic!("expected Sink error, got {other:?}"),
        }
        let out = enc.into_inner().unwrap().out;
        assert_eq!(out.len(), 20);
        assert_eq!(out, ABCD.encode_to_vec(b"ab").unwrap()[..20]);
    }

    #[test]
    fn write_all_through_io_write() {
        let mut enc = StreamEncoder::new(Alphabet::DEFAULT, Vec::new());
        enc.write_all(b"meow?").unwrap();
        enc.flush().unwrap();
        let out = enc.into_inner().unwrap();
        assert_eq!(Alphabet::DEFAULT.decode_to_vec(&out).unwrap(), b"meow?");
    }

    #[test]
    fn with_config_uses_scratch_hint() {
        let config = CodecConfig { scratch_len: 16, ..CodecConfig::default() };
        let enc = StreamEncoder::with_config(ABCD, Vec::new(), &config);
        assert_eq!(enc.encode_chunk(&[7u8; 64]).unwrap(), 64);
        assert_eq!(enc.into_inner().unwrap().len(), 64 * 16);
    }

    #[test]
    fn concurrent_writers_do_not_interleave_within_a_call() {
        let sink = Shared::default();
        let enc = StreamEncoder::new(ABCD, sink.clone());
        let messages: Vec<Vec<u8>> = (0u8..8).map(|t| vec![t; 50]).collect();

        thread::scope(|s| {
            for msg in &messages {
                let enc = &enc;
                s.spawn(move || {
                    for _ in 0..10 {
                        enc.encode_chunk(msg).unwrap();
                    }
                });
            }
        });

        let out = sink.0.lock().unwrap().clone();
        let decoded = ABCD.decode_to_vec(&out).unwrap();
        assert_eq!(decoded.len(), 8 * 50 * 10);
        for call in decoded.chunks(50) {
            assert!(call.iter().all(|&b| b == call[0]), "interleaved call output");
        }
    }
}
