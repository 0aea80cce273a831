use std::collections::BTreeMap;

use crate::core::word_counts::{KeyLayout, WordCounts, WordKey};

/// Bag with a fixed key layout: `(word, level)` is folded into one `u64`.
///
/// Keys are kept ordered, so `entries` needs no sort. Word bounds are
/// checked at fit time so that packing never overflows.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBag {
    layout: KeyLayout,
    counts: BTreeMap<u64, u32>,
}

impl PackedBag {
    pub fn new(layout: KeyLayout) -> Self {
        Self {
            layout,
            counts: BTreeMap::new(),
        }
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    /// Raw packed keys and counts, in packed-key order.
    pub fn packed_entries(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.counts.iter().map(|(&k, &c)| (k, c))
    }
}

impl WordCounts for PackedBag {
    fn add(&mut self, key: WordKey, n: u32) {
        *self.counts.entry(self.layout.pack(key)).or_insert(0) += n;
    }

    fn count(&self, key: WordKey) -> u32 {
        self.counts
            .get(&self.layout.pack(key))
            .copied()
            .unwrap_or(0)
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn entries(&self) -> Vec<(WordKey, u32)> {
        // Packed order is (word, level) order because level < n_tags
        self.counts
            .iter()
            .map(|(&k, &c)| (self.layout.unpack(k), c))
            .collect()
    }
}
