#[cfg(test)]
mod tests {
    use fourletter::{Alphabet, FourLetterError};
    use proptest::prelude::*;

    #[test]
    fn accepts_distinct_tokens() {
        let a = Alphabet::new("aaaabbbbccccdddd").unwrap();
        assert_eq!(a.tokens(), &[*b"aaaa", *b"bbbb", *b"cccc", *b"dddd"]);
        assert_eq!(a.encode_value(2), b"cccc");
        assert_eq!(a.decode_token(b"dddd"), Some(3));
    }

    #[test]
    fn rejects_short_spec() {
        assert!(matches!(
            Alphabet::new("a"),
            Err(FourLetterError::InvalidAlphabetLength { len: 1 })
        ));
    }

    #[test]
    fn rejects_long_spec() {
        assert!(matches!(
            Alphabet::new("aaaabbbbccccddddX"),
            Err(FourLetterError::InvalidAlphabetLength { len: 17 })
        ));
    }

    #[test]
    fn rejects_duplicate_tokens() {
        match Alphabet::new("abcdabcd12345678") {
            Err(FourLetterError::DuplicateToken { first, second, token }) => {
                assert_eq!((first, second), (0, 1));
                assert_eq!(&token, b"abcd");
            }
            other => panic!("expected DuplicateToken, got {other:?}"),
        }
    }

    #[test]
    fn decode_token_not_found() {
        let a = Alphabet::DEFAULT;
        assert_eq!(a.decode_token(b"woof"), None);
        // Wrong width never matches
        assert_eq!(a.decode_token(b"meo"), None);
    }

    #[test]
    fn binary_tokens_are_allowed() {
        let spec = [0u8, 0, 0, 0, 1, 1, 1, 1, 0xFF, 0xFE, 0xFD, 0xFC, 0x80, 0, 0, 1];
        let a = Alphabet::try_from(&spec[..]).unwrap();
        assert!(!a.is_utf8());
        assert_eq!(a.spec(), spec);
    }

    #[test]
    fn parses_from_str() {
        let a: Alphabet = "boatfeetbowlsoap".parse().unwrap();
        assert_eq!(a.decode_token(b"soap"), Some(3));
        assert!(a.is_utf8());
    }

    proptest! {
        #[test]
        fn prop_repeated_chunk_is_duplicate(
            words in any::<[[u8; 4]; 4]>(),
            i in 0usize..4,
            j in 0usize..4,
        ) {
            prop_assume!(i != j);
            let mut words = words;
            words[j] = words[i];
            let spec: Vec<u8> = words.iter().flatten().copied().collect();
            let is_duplicate = matches!(
                Alphabet::new(&spec),
                Err(FourLetterError::DuplicateToken { .. })
            );
            prop_assert!(is_duplicate);
        }

        #[test]
        fn prop_wrong_length_rejected(spec in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assume!(spec.len() != 16);
            let is_length_error = matches!(
                Alphabet::new(&spec),
                Err(FourLetterError::InvalidAlphabetLength { len }) if len == spec.len()
            );
            prop_assert!(is_length_error);
        }
    }
}
