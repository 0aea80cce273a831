pub mod anova;
pub mod bag_builder;
pub mod binning;
pub mod common;
pub mod fit;
pub mod fourier;
pub mod igb;
pub mod kmeans;
pub mod mft;
pub mod pyramid;
pub mod word;
