use std::collections::HashMap;

use crate::core::word_counts::{WordCounts, WordKey};

/// Bag backed by a `HashMap` keyed by `(word, level)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashedBag {
    counts: HashMap<WordKey, u32>,
}

impl HashedBag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCounts for HashedBag {
    fn add(&mut self, key: WordKey, n: u32) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    fn count(&self, key: WordKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn entries(&self) -> Vec<(WordKey, u32)> {
        let mut entries: Vec<(WordKey, u32)> = self.counts.iter().map(|(&k, &c)| (k, c)).collect();
        entries.sort_unstable_by_key(|&(k, _)| k);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashed_bag_counts() {
        let mut bag = HashedBag::new();
        bag.increment(WordKey::new(5, 0));
        bag.increment(WordKey::new(5, 0));
        bag.increment(WordKey::new(5, 1));
        bag.add(WordKey::new(2, 0), 3);

        assert_eq!(bag.len(), 3);
        assert_eq!(bag.count(WordKey::new(5, 0)), 2);
        assert_eq!(bag.count(WordKey::new(5, 1)), 1);
        assert_eq!(bag.count(WordKey::new(9, 0)), 0);
        assert_eq!(bag.total(), 6);
        assert_eq!(
            bag.entries(),
            vec![
                (WordKey::new(2, 0), 3),
                (WordKey::new(5, 0), 2),
                (WordKey::new(5, 1), 1)
            ]
        );
    }
}
