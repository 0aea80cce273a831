use crate::core::error::{Result, SfaError};

/// Packs symbol sequences into base-`alphabet_size` integers, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEncoder {
    word_length: usize,
    alphabet_size: usize,
    /// `alphabet_size ^ word_length`: number of distinct words.
    word_space: u64,
}

impl WordEncoder {
    pub fn new(word_length: usize, alphabet_size: usize) -> Result<Self> {
        let word_space = letter_space(word_length, alphabet_size)?;
        Ok(Self {
            word_length,
            alphabet_size,
            word_space,
        })
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Number of distinct unigram words; every word is below this.
    pub fn word_space(&self) -> u64 {
        self.word_space
    }

    /// Number of distinct bigram words, or `WordOverflow` if they need more than 64 bits.
    pub fn bigram_space(&self) -> Result<u64> {
        letter_space(2 * self.word_length, self.alphabet_size)
    }

    #[inline]
    pub fn encode(&self, symbols: &[usize]) -> u64 {
        debug_assert_eq!(symbols.len(), self.word_length);
        let base = self.alphabet_size as u64;
        symbols.iter().fold(0u64, |word, &s| word * base + s as u64)
    }

    /// Previous word in the high digits, current word in the low digits.
    #[inline]
    pub fn bigram(&self, previous: u64, current: u64) -> u64 {
        previous * self.word_space + current
    }

    pub fn decode(&self, mut word: u64) -> Vec<usize> {
        let base = self.alphabet_size as u64;
        let mut symbols = vec![0; self.word_length];
        for slot in symbols.iter_mut().rev() {
            *slot = (word % base) as usize;
            word /= base;
        }
        symbols
    }

    /// Split a bigram into `(previous, current)`.
    pub fn decode_bigram(&self, word: u64) -> (u64, u64) {
        (word / self.word_space, word % self.word_space)
    }

    /// Letters `a`, `b`, ... for symbols 0, 1, ...
    pub fn render(&self, word: u64) -> String {
        self.decode(word).into_iter().map(letter).collect()
    }

    pub fn render_bigram(&self, word: u64) -> String {
        let (previous, current) = self.decode_bigram(word);
        format!("{}+{}", self.render(previous), self.render(current))
    }
}

fn letter_space(letters: usize, alphabet_size: usize) -> Result<u64> {
    u32::try_from(letters)
        .ok()
        .and_then(|l| (alphabet_size as u64).checked_pow(l))
        .ok_or(SfaError::WordOverflow {
            letters,
            alphabet_size,
        })
}

fn letter(symbol: usize) -> char {
    u32::try_from(symbol)
        .ok()
        .and_then(|s| ('a' as u32).checked_add(s))
        .and_then(char::from_u32)
        .unwrap_or('?')
}
