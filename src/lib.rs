pub mod algorithms;
pub mod bags;
pub mod core;

pub use crate::algorithms::fit::ClassLabels;
pub use crate::algorithms::fourier::{CoefficientLayout, FourierApproximator};
pub use crate::algorithms::mft::MftState;
pub use crate::algorithms::pyramid::LevelTags;
pub use crate::algorithms::word::WordEncoder;
pub use crate::bags::{Bag, HashedBag, PackedBag};
pub use crate::core::breakpoints::Breakpoints;
pub use crate::core::config::{BagBackend, BinningMethod, FourierTransform, SfaConfig};
pub use crate::core::error::{Result, SfaError};
pub use crate::core::model::{LevelModel, SfaModel};
pub use crate::core::word_counts::{KeyLayout, WordCounts, WordKey};

use crate::algorithms::common::encode_labels;

/// Symbolic Fourier Approximation: fits breakpoints on training series and
/// turns series into bags of words.
///
/// # Examples
///
/// ```
/// use sfa_rs::{Sfa, SfaConfig, WordCounts};
///
/// let x: Vec<Vec<f64>> = (0..4)
///     .map(|s| (0..64).map(|i| (i as f64 * 0.25 + s as f64).sin()).collect())
///     .collect();
/// let model = Sfa::new(SfaConfig::new(4, 4, 16)).fit(&x).unwrap();
/// assert_eq!(model.breakpoints().shape(), (4, 4));
///
/// let bags = model.transform(&x).unwrap();
/// assert_eq!(bags.len(), 4);
/// assert!(bags.iter().all(|bag| !bag.is_empty()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sfa {
    config: SfaConfig,
}

impl Sfa {
    /// Create an unfitted transform with the given configuration.
    pub fn new(config: SfaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SfaConfig {
        &self.config
    }

    /// Fit without labels.
    ///
    /// Fails with [`SfaError::MissingLabels`] when the configuration needs
    /// labels (ANOVA selection or information-gain binning).
    pub fn fit<S: AsRef<[f64]> + Sync>(&self, x: &[S]) -> Result<SfaModel> {
        algorithms::fit::fit(&self.config, x, None)
    }

    /// Fit with one class label per series. Labels may be of any ordered type.
    pub fn fit_supervised<S, L>(&self, x: &[S], y: &[L]) -> Result<SfaModel>
    where
        S: AsRef<[f64]> + Sync,
        L: Ord,
    {
        let (ids, n_classes) = encode_labels(y);
        let labels = ClassLabels {
            ids: &ids,
            n_classes,
        };
        algorithms::fit::fit(&self.config, x, Some(labels))
    }
}
