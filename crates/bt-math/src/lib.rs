//! # bt-math
//!
//! Mathematical utilities: the standard normal distribution (via statrs),
//! running statistics, return-distribution analysis of price histories,
//! and seeded random number generation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal density, CDF, and inverse CDF.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators and return analysis.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{GaussianRng, IrwinHallRng, MersenneTwisterUniformRng, NormalDeviates};
pub use statistics::{
    qq_points, sampling_interval_analysis, scaled_returns, simple_returns, ReturnHistogram,
    ReturnSummary, Statistics,
};
