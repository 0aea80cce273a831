pub mod hashed;
pub mod packed;

use crate::core::config::BagBackend;
use crate::core::word_counts::{KeyLayout, WordCounts, WordKey};

pub use hashed::HashedBag;
pub use packed::PackedBag;

/// Bag of words for one series, stored in the configured backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Bag {
    Hashed(HashedBag),
    Packed(PackedBag),
}

impl Bag {
    pub fn new(backend: BagBackend, layout: KeyLayout) -> Self {
        match backend {
            BagBackend::Generic => Bag::Hashed(HashedBag::new()),
            BagBackend::Typed => Bag::Packed(PackedBag::new(layout)),
        }
    }

    pub fn backend(&self) -> BagBackend {
        match self {
            Bag::Hashed(_) => BagBackend::Generic,
            Bag::Packed(_) => BagBackend::Typed,
        }
    }

    fn counts(&self) -> &dyn WordCounts {
        match self {
            Bag::Hashed(b) => b,
            Bag::Packed(b) => b,
        }
    }

    fn counts_mut(&mut self) -> &mut dyn WordCounts {
        match self {
            Bag::Hashed(b) => b,
            Bag::Packed(b) => b,
        }
    }
}

impl WordCounts for Bag {
    fn add(&mut self, key: WordKey, n: u32) {
        self.counts_mut().add(key, n);
    }

    fn count(&self, key: WordKey) -> u32 {
        self.counts().count(key)
    }

    fn len(&self) -> usize {
        self.counts().len()
    }

    fn entries(&self) -> Vec<(WordKey, u32)> {
        self.counts().entries()
    }
}
