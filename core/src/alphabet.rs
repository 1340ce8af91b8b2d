//! alphabet.rs
//! Four distinct 4-byte tokens; token `i` stands for the 2-bit value `i`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{ALPHABET_SPEC_LEN, DEFAULT_ALPHABET_SPEC, WORD_COUNT, WORD_LEN};
use crate::types::FourLetterError;

/// One alphabet token.
pub type Word = [u8; WORD_LEN];

/// Validated, immutable alphabet.
///
/// Built from a 16-byte specification read as four consecutive tokens
/// (bytes 0..4, 4..8, 8..12, 12..16). It is 16 bytes and `Copy`, so encoders
/// and decoders hold their own copy and never lock it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    words: [Word; WORD_COUNT],
}

impl Alphabet {
    /// Cat noises: `meow`, `mrow`, `purr`, `meww`.
    pub const DEFAULT: Alphabet = Alphabet::from_literal(DEFAULT_ALPHABET_SPEC);

    /// Validate `spec` and build an alphabet.
    ///
    /// # Errors
    /// - `InvalidAlphabetLength` if `spec` is not exactly 16 bytes
    /// - `DuplicateToken` if two of the four tokens are equal
    pub fn new(spec: impl AsRef<[u8]>) -> Result<Self, FourLetterError> {
        let spec = spec.as_ref();
        if spec.len() != ALPHABET_SPEC_LEN {
            return Err(FourLetterError::InvalidAlphabetLength { len: spec.len() });
        }

        let mut words = [[0u8; WORD_LEN]; WORD_COUNT];
        for (word, chunk) in words.iter_mut().zip(spec.chunks_exact(WORD_LEN)) {
            word.copy_from_slice(chunk);
        }

        if let Some((first, second)) = find_duplicate(&words) {
            return Err(FourLetterError::DuplicateToken {
                first,
                second,
                token: words[first],
            });
        }

        Ok(Alphabet { words })
    }

    /// Build an alphabet from a literal the caller knows to be valid.
    ///
    /// Panics on an invalid specification instead of returning an error.
    /// Usable in `const` items, where a bad literal fails the build.
    pub const fn from_literal(spec: &str) -> Self {
        let bytes = spec.as_bytes();
        if bytes.len() != ALPHABET_SPEC_LEN {
            panic!("alphabet literal must be exactly 16 bytes");
        }

        let mut words = [[0u8; WORD_LEN]; WORD_COUNT];
        let mut i = 0;
        while i < ALPHABET_SPEC_LEN {
            words[i / WORD_LEN][i % WORD_LEN] = bytes[i];
            i += 1;
        }

        if find_duplicate(&words).is_some() {
            panic!("alphabet literal has duplicate words");
        }

        Alphabet { words }
    }

    /// Token for a 2-bit value. Only the low two bits of `value` are used.
    #[inline(always)]
    pub const fn encode_value(&self, value: u8) -> &Word {
        &self.words[(value & 0x03) as usize]
    }

    /// 2-bit value for a token, or `None` if `word` is not in the alphabet.
    #[inline]
    pub fn decode_token(&self, word: &[u8]) -> Option<u8> {
        self.words
            .iter()
            .position(|w| w.as_slice() == word)
            .map(|i| i as u8)
    }

    /// The four tokens in value order.
    pub fn tokens(&self) -> &[Word; WORD_COUNT] {
        &self.words
    }

    /// Whether every token is valid UTF-8 on its own, which makes any
    /// encoded output valid UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.words.iter().all(|w| std::str::from_utf8(w).is_ok())
    }

    /// The 16-byte specification this alphabet was built from.
    pub fn spec(&self) -> [u8; ALPHABET_SPEC_LEN] {
        let mut out = [0u8; ALPHABET_SPEC_LEN];
        for (chunk, word) in out.chunks_exact_mut(WORD_LEN).zip(self.words.iter()) {
            chunk.copy_from_slice(word);
        }
        out
    }
}

/// First pair of equal tokens, by index.
const fn find_duplicate(words: &[Word; WORD_COUNT]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < WORD_COUNT {
        let mut j = i + 1;
        while j < WORD_COUNT {
            if words_eq(&words[i], &words[j]) {
                return Some((i, j));
            }
            j += 1;
        }
        i += 1;
    }
    None
}

const fn words_eq(a: &Word, b: &Word) -> bool {
    a[0] == b[0] && a[1] == b[1] && a[2] == b[2] && a[3] == b[3]
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::DEFAULT
    }
}

impl FromStr for Alphabet {
    type Err = FourLetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::new(s)
    }
}

impl TryFrom<&[u8]> for Alphabet {
    type Error = FourLetterError;

    fn try_from(spec: &[u8]) -> Result<Self, Self::Error> {
        Alphabet::new(spec)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec().escape_ascii())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("spec", &self.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cat_noises() {
        assert_eq!(Alphabet::DEFAULT.encode_value(0), b"meow");
        assert_eq!(Alphabet::DEFAULT.encode_value(3), b"meww");
        assert_eq!(Alphabet::default(), Alphabet::DEFAULT);
    }

    #[test]
    fn encode_value_masks_high_bits() {
        let a = Alphabet::from_literal("aaaabbbbccccdddd");
        assert_eq!(a.encode_value(0b1111_0110), b"cccc");
    }

    #[test]
    fn display_round_trips_spec() {
        let a = Alphabet::from_literal("boatfeetbowlsoap");
        assert_eq!(a.to_string(), "boatfeetbowlsoap");
        assert_eq!(a.to_string().parse::<Alphabet>().unwrap(), a);
    }

    #[test]
    #[should_panic(expected = "exactly 16 bytes")]
    fn from_literal_panics_on_short_spec() {
        let _ = Alphabet::from_literal("meow");
    }

    #[test]
    #[should_panic(expected = "duplicate")]
    fn from_literal_panics_on_duplicate() {
        let _ = Alphabet::from_literal("abcdabcd12345678");
    }
}
