use crate::algorithms::fourier::CoefficientLayout;

/// Smallest window a pyramid level shrinks to.
pub const MIN_LEVEL_WINDOW: usize = 2;

/// Window length of every level: `window_size >> l`, floored at [`MIN_LEVEL_WINDOW`].
///
/// Levels never exceed the base window, so a base window below the floor is
/// used as-is at every level.
pub fn level_windows(window_size: usize, levels: usize) -> Vec<usize> {
    (0..levels)
        .map(|l| {
            let shifted = u32::try_from(l)
                .ok()
                .and_then(|s| window_size.checked_shr(s))
                .unwrap_or(0);
            shifted.max(MIN_LEVEL_WINDOW).min(window_size)
        })
        .collect()
}

/// Letters per word at a level: `word_length`, limited to what the window provides.
pub fn effective_word_length(word_length: usize, window_size: usize, norm: bool) -> usize {
    word_length.min(CoefficientLayout::max_dft_length(window_size, norm))
}

/// Level identifiers stored next to each word in a bag.
///
/// Unigrams of level `l` carry tag `l`, bigrams carry `levels + l`, so the
/// same symbols from another scale or word kind never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTags {
    levels: usize,
    bigrams: bool,
}

impl LevelTags {
    pub fn new(levels: usize, bigrams: bool) -> Self {
        Self { levels, bigrams }
    }

    /// Number of distinct tags.
    pub fn n_tags(&self) -> usize {
        if self.bigrams {
            2 * self.levels
        } else {
            self.levels
        }
    }

    #[inline]
    pub fn unigram(&self, level: usize) -> u32 {
        level as u32
    }

    #[inline]
    pub fn bigram(&self, level: usize) -> u32 {
        (self.levels + level) as u32
    }

    /// `(level, is_bigram)` of a tag.
    pub fn split(&self, tag: u32) -> (usize, bool) {
        let tag = tag as usize;
        if tag >= self.levels {
            (tag - self.levels, true)
        } else {
            (tag, false)
        }
    }
}
