/// A bag key: a packed word and the tag of the level that produced it.
///
/// Unigrams of level `l` carry tag `l`; bigrams of level `l` carry `levels + l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordKey {
    pub word: u64,
    pub level: u32,
}

impl WordKey {
    pub fn new(word: u64, level: u32) -> Self {
        Self { word, level }
    }
}

/// Layout used to fold a `WordKey` into a single `u64`: `word * n_tags + level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLayout {
    n_tags: u64,
}

impl KeyLayout {
    pub fn new(n_tags: u64) -> Self {
        debug_assert!(n_tags > 0);
        Self { n_tags }
    }

    /// Number of distinct level tags.
    pub fn n_tags(&self) -> u64 {
        self.n_tags
    }

    /// Whether every word up to `max_word` packs without overflow.
    pub fn fits(&self, max_word: u64) -> bool {
        max_word
            .checked_mul(self.n_tags)
            .and_then(|v| v.checked_add(self.n_tags - 1))
            .is_some()
    }

    #[inline]
    pub fn pack(&self, key: WordKey) -> u64 {
        debug_assert!((key.level as u64) < self.n_tags);
        key.word * self.n_tags + key.level as u64
    }

    #[inline]
    pub fn unpack(&self, packed: u64) -> WordKey {
        WordKey {
            word: packed / self.n_tags,
            level: (packed % self.n_tags) as u32,
        }
    }
}

/// Key-counting map used to accumulate a bag of words.
///
/// Implementations differ only in storage layout; all observable behavior
/// (counts, entries, decoded output) must be identical.
pub trait WordCounts: Send + Sync {
    /// Add `n` occurrences of `key`.
    fn add(&mut self, key: WordKey, n: u32);

    /// Occurrences of `key` (0 when absent).
    fn count(&self, key: WordKey) -> u32;

    /// Number of distinct keys.
    fn len(&self) -> usize;

    /// All `(key, count)` pairs sorted by key.
    fn entries(&self) -> Vec<(WordKey, u32)>;

    fn increment(&mut self, key: WordKey) {
        self.add(key, 1);
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts.
    fn total(&self) -> u64 {
        self.entries().iter().map(|&(_, c)| c as u64).sum()
    }
}
