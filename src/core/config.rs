use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SfaError};

/// Strategy used to learn per-coefficient breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinningMethod {
    /// Equal-frequency bins from empirical quantiles.
    #[default]
    EquiDepth,
    /// Equal-width bins over `[min, max]`.
    EquiWidth,
    /// Supervised splits maximising class information gain.
    InformationGain,
    /// Midpoints between 1-D k-means cluster centers.
    Kmeans,
}

impl BinningMethod {
    pub const ALL: [BinningMethod; 4] = [
        BinningMethod::EquiDepth,
        BinningMethod::EquiWidth,
        BinningMethod::InformationGain,
        BinningMethod::Kmeans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BinningMethod::EquiDepth => "equi-depth",
            BinningMethod::EquiWidth => "equi-width",
            BinningMethod::InformationGain => "information-gain",
            BinningMethod::Kmeans => "kmeans",
        }
    }

    /// Whether the strategy needs class labels at fit time.
    pub fn is_supervised(&self) -> bool {
        matches!(self, BinningMethod::InformationGain)
    }

    /// Cut value used for rows that carry no information.
    pub fn default_cut(&self) -> f64 {
        match self {
            BinningMethod::InformationGain => f64::MAX,
            _ => 0.0,
        }
    }
}

impl fmt::Display for BinningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BinningMethod {
    type Err = SfaError;

    fn from_str(s: &str) -> Result<Self> {
        BinningMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SfaError::UnsupportedBinningMethod(s.to_string()))
    }
}

/// Algorithm for single-window transforms (also seeds the moving transform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FourierTransform {
    /// Real-input FFT.
    Fft,
    /// Explicit O(w * k) summation.
    #[default]
    Dft,
}

impl FourierTransform {
    pub fn as_str(&self) -> &'static str {
        match self {
            FourierTransform::Fft => "fft",
            FourierTransform::Dft => "dft",
        }
    }
}

impl fmt::Display for FourierTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FourierTransform {
    type Err = SfaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fft" => Ok(FourierTransform::Fft),
            "dft" => Ok(FourierTransform::Dft),
            other => Err(SfaError::UnsupportedFourierTransform(other.to_string())),
        }
    }
}

/// Storage used for bags of words. Both backends produce identical contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BagBackend {
    /// `HashMap` keyed by `(word, level)` pairs.
    #[default]
    Generic,
    /// Ordered map keyed by `(word, level)` packed into one `u64`.
    Typed,
}

impl FromStr for BagBackend {
    type Err = SfaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generic" => Ok(BagBackend::Generic),
            "typed" => Ok(BagBackend::Typed),
            other => Err(SfaError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Configuration for SFA fitting and transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SfaConfig {
    /// Letters per word.
    pub word_length: usize,
    /// Symbols per letter.
    pub alphabet_size: usize,
    /// Sliding window width at level 0.
    pub window_size: usize,
    /// Standardize each window and drop the DC coefficient.
    pub norm: bool,
    /// Select coefficients by ANOVA F-statistic instead of truncation.
    pub anova: bool,
    /// Also count words of adjacent windows concatenated.
    ///
    /// A bigram packs `2 * word_length` letters, so `alphabet_size^(2 * word_length)`
    /// must fit in a `u64` on either backend; otherwise fitting fails with
    /// [`SfaError::WordOverflow`](crate::SfaError::WordOverflow).
    pub bigrams: bool,
    /// Number of window scales; level `l` uses `window_size >> l`.
    pub levels: usize,
    pub binning_method: BinningMethod,
    pub fourier_transform: FourierTransform,
    pub backend: BagBackend,
    /// Negate imaginary parts; otherwise scale coefficients by `1/sqrt(w)`.
    pub lower_bounding: bool,
    /// Count a run of identical consecutive words once.
    #[serde(alias = "remove_repeat_words")]
    pub numerosity_reduction: bool,
    /// Size of a dedicated worker pool. `None` uses the global pool.
    pub n_jobs: Option<usize>,
}

impl Default for SfaConfig {
    fn default() -> Self {
        Self {
            word_length: 8,
            alphabet_size: 4,
            window_size: 12,
            norm: false,
            anova: false,
            bigrams: false,
            levels: 1,
            binning_method: BinningMethod::default(),
            fourier_transform: FourierTransform::default(),
            backend: BagBackend::default(),
            lower_bounding: true,
            numerosity_reduction: true,
            n_jobs: None,
        }
    }
}

impl SfaConfig {
    pub fn new(word_length: usize, alphabet_size: usize, window_size: usize) -> Self {
        Self {
            word_length,
            alphabet_size,
            window_size,
            ..Self::default()
        }
    }

    pub fn with_norm(mut self, norm: bool) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_anova(mut self, anova: bool) -> Self {
        self.anova = anova;
        self
    }

    pub fn with_bigrams(mut self, bigrams: bool) -> Self {
        self.bigrams = bigrams;
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_binning_method(mut self, method: BinningMethod) -> Self {
        self.binning_method = method;
        self
    }

    pub fn with_fourier_transform(mut self, transform: FourierTransform) -> Self {
        self.fourier_transform = transform;
        self
    }

    pub fn with_backend(mut self, backend: BagBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_lower_bounding(mut self, lower_bounding: bool) -> Self {
        self.lower_bounding = lower_bounding;
        self
    }

    pub fn with_numerosity_reduction(mut self, enabled: bool) -> Self {
        self.numerosity_reduction = enabled;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    /// Whether fitting needs class labels.
    pub fn is_supervised(&self) -> bool {
        self.anova || self.binning_method.is_supervised()
    }

    /// Check option ranges that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 {
            return Err(invalid("word_length", "must be at least 1"));
        }
        if self.alphabet_size < 2 {
            return Err(invalid(
                "alphabet_size",
                format!("must be at least 2, got {}", self.alphabet_size),
            ));
        }
        if self.window_size == 0 {
            return Err(invalid("window_size", "must be at least 1"));
        }
        if self.norm && self.window_size < 2 {
            return Err(invalid(
                "window_size",
                "must be at least 2 when norm drops the DC coefficient",
            ));
        }
        if self.levels == 0 {
            return Err(invalid("levels", "must be at least 1"));
        }
        if self.n_jobs == Some(0) {
            return Err(invalid("n_jobs", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> SfaError {
    SfaError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
