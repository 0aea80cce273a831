use thiserror::Error;

/// Result type for SFA operations.
pub type Result<T> = std::result::Result<T, SfaError>;

/// Errors raised while configuring, fitting or applying an SFA model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SfaError {
    /// Unknown discretization strategy name.
    #[error("unsupported binning method '{0}': expected one of equi-depth, equi-width, information-gain, kmeans")]
    UnsupportedBinningMethod(String),

    /// Unknown direct transform name.
    #[error("unsupported fourier transform '{0}': expected one of fft, dft")]
    UnsupportedFourierTransform(String),

    /// Unknown dictionary backend name.
    #[error("unsupported dictionary backend '{0}': expected one of generic, typed")]
    UnsupportedBackend(String),

    /// A numeric option is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// No series were supplied.
    #[error("input contains no series")]
    EmptyInput,

    /// Series in one collection differ in length.
    #[error("series {index} has length {actual}, expected {expected}")]
    RaggedInput {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A supervised strategy was requested without labels.
    #[error("{0} requires class labels")]
    MissingLabels(&'static str),

    /// Label vector length differs from the number of series.
    #[error("got {labels} labels for {series} series")]
    LabelMismatch { series: usize, labels: usize },

    /// A transform-time series is shorter than the fitted window.
    #[error("series {index} has length {length}, shorter than the fitted window {window}")]
    IncompatibleInput {
        index: usize,
        length: usize,
        window: usize,
    },

    /// Packed words would not fit into a 64-bit key.
    #[error("words of {letters} letters over an alphabet of {alphabet_size} do not fit in 64 bits")]
    WordOverflow { letters: usize, alphabet_size: usize },

    /// The dedicated worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}
