pub mod breakpoints;
pub mod config;
pub mod error;
pub mod model;
pub mod word_counts;
