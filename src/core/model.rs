use std::fmt::Write as _;

use crate::algorithms::bag_builder;
use crate::algorithms::fourier::{CoefficientLayout, FourierApproximator};
use crate::algorithms::mft;
use crate::algorithms::pyramid::LevelTags;
use crate::algorithms::word::WordEncoder;
use crate::bags::Bag;
use crate::core::breakpoints::Breakpoints;
use crate::core::config::{FourierTransform, SfaConfig};
use crate::core::error::{Result, SfaError};
use crate::core::word_counts::{KeyLayout, WordCounts, WordKey};

/// Fitted state of one pyramid level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelModel {
    pub(crate) level: usize,
    pub(crate) layout: CoefficientLayout,
    pub(crate) mode: FourierTransform,
    /// Retained entries of the coefficient vector, ascending.
    pub(crate) support: Vec<usize>,
    pub(crate) breakpoints: Breakpoints,
    pub(crate) encoder: WordEncoder,
}

impl LevelModel {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn window_size(&self) -> usize {
        self.layout.window_size
    }

    pub fn dft_length(&self) -> usize {
        self.layout.dft_length
    }

    pub fn word_length(&self) -> usize {
        self.support.len()
    }

    pub fn support(&self) -> &[usize] {
        &self.support
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn encoder(&self) -> &WordEncoder {
        &self.encoder
    }

    /// Fresh approximator for this level's layout and transform.
    pub fn approximator(&self) -> FourierApproximator {
        FourierApproximator::new(self.layout, self.mode)
    }

    /// Visit the selected coefficients of every window of `series`, in order.
    pub fn for_each_selected<F>(&self, series: &[f64], mut visit: F)
    where
        F: FnMut(usize, &[f64]),
    {
        let mut approximator = self.approximator();
        let mut selected = vec![0.0; self.support.len()];
        mft::for_each_window(series, &mut approximator, |i, coefs| {
            for (slot, &j) in selected.iter_mut().zip(&self.support) {
                *slot = coefs[j];
            }
            visit(i, &selected);
        });
    }

    /// Visit the word of every window of `series`, in order.
    pub fn for_each_word<F>(&self, series: &[f64], mut visit: F)
    where
        F: FnMut(usize, u64),
    {
        let mut symbols = vec![0; self.support.len()];
        self.for_each_selected(series, |i, values| {
            for (r, (slot, &v)) in symbols.iter_mut().zip(values).enumerate() {
                *slot = self.breakpoints.symbol(r, v);
            }
            visit(i, self.encoder.encode(&symbols));
        });
    }

    /// Unigram words of every window, `n - window_size + 1` of them.
    pub fn words(&self, series: &[f64]) -> Vec<u64> {
        let mut words = Vec::with_capacity(series.len().saturating_sub(self.window_size()) + 1);
        self.for_each_word(series, |_, word| words.push(word));
        words
    }
}

/// An immutable fitted SFA transform.
///
/// Produced by [`Sfa::fit`](crate::Sfa::fit) and shared read-only by every
/// transform call.
#[derive(Debug, Clone, PartialEq)]
pub struct SfaModel {
    pub(crate) config: SfaConfig,
    pub(crate) series_length: usize,
    pub(crate) levels: Vec<LevelModel>,
    pub(crate) tags: LevelTags,
    pub(crate) key_layout: KeyLayout,
}

impl SfaModel {
    pub fn config(&self) -> &SfaConfig {
        &self.config
    }

    /// Length of the training series.
    pub fn series_length(&self) -> usize {
        self.series_length
    }

    pub fn levels(&self) -> &[LevelModel] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&LevelModel> {
        self.levels.get(level)
    }

    pub fn tags(&self) -> LevelTags {
        self.tags
    }

    pub fn key_layout(&self) -> KeyLayout {
        self.key_layout
    }

    fn base(&self) -> &LevelModel {
        // fit always builds at least one level
        &self.levels[0]
    }

    /// Breakpoints of the base level, shape `(word_length, alphabet_size)`.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.base().breakpoints
    }

    /// Selected coefficient entries of the base level.
    pub fn support(&self) -> &[usize] {
        &self.base().support
    }

    pub fn dft_length(&self) -> usize {
        self.base().dft_length()
    }

    pub fn word_length(&self) -> usize {
        self.base().word_length()
    }

    /// Base level window.
    pub fn window_size(&self) -> usize {
        self.base().window_size()
    }

    /// Direct DFT of a single window, `dft_length` values.
    pub fn discrete_fourier_transform(&self, window: &[f64]) -> Vec<f64> {
        self.single_window(window, FourierTransform::Dft)
    }

    /// FFT of a single window, `dft_length` values.
    pub fn fast_fourier_transform(&self, window: &[f64]) -> Vec<f64> {
        self.single_window(window, FourierTransform::Fft)
    }

    fn single_window(&self, window: &[f64], mode: FourierTransform) -> Vec<f64> {
        let layout = CoefficientLayout {
            window_size: window.len(),
            ..self.base().layout
        };
        FourierApproximator::new(layout, mode).transform(window)
    }

    /// Selected base-level coefficients of every window of `series`.
    ///
    /// Returns `n - window_size + 1` vectors of `word_length` values each.
    pub fn mft(&self, series: &[f64]) -> Result<Vec<Vec<f64>>> {
        self.check_length(0, series)?;
        let mut out = Vec::with_capacity(series.len() - self.window_size() + 1);
        self.base()
            .for_each_selected(series, |_, values| out.push(values.to_vec()));
        Ok(out)
    }

    /// Per-level unigram word sequences of `series`, before bagging.
    pub fn words(&self, series: &[f64]) -> Result<Vec<Vec<u64>>> {
        self.check_length(0, series)?;
        Ok(self.levels.iter().map(|level| level.words(series)).collect())
    }

    /// One bag per series, index-aligned with the input.
    pub fn transform<S: AsRef<[f64]> + Sync>(&self, x: &[S]) -> Result<Vec<Bag>> {
        bag_builder::transform(self, x)
    }

    pub fn transform_series(&self, series: &[f64]) -> Result<Bag> {
        self.check_length(0, series)?;
        Ok(bag_builder::build_bag(self, series))
    }

    /// Every series must cover the largest (base) window.
    pub(crate) fn check_length(&self, index: usize, series: &[f64]) -> Result<()> {
        let window = self.window_size();
        if series.len() < window {
            return Err(SfaError::IncompatibleInput {
                index,
                length: series.len(),
                window,
            });
        }
        Ok(())
    }

    /// Printable form of one bag key: `abcd@0`, or `abcd+bcda@1` for a bigram.
    pub fn word_to_string(&self, key: WordKey) -> String {
        let (level, is_bigram) = self.tags.split(key.level);
        let rendered = match self.levels.get(level) {
            Some(lm) if is_bigram => lm.encoder.render_bigram(key.word),
            Some(lm) => lm.encoder.render(key.word),
            None => key.word.to_string(),
        };
        format!("{rendered}@{level}")
    }

    /// Printable form of a bag, entries sorted by key.
    pub fn bag_to_string(&self, bag: &Bag) -> String {
        let mut out = String::from("{");
        for (i, (key, count)) in bag.entries().into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}: {count}", self.word_to_string(key));
        }
        out.push('}');
        out
    }
}
