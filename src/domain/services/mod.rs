//! Pure domain computations.

pub mod scaling;

pub use scaling::{capacity_bytes, downsample_factor, fit_within};
