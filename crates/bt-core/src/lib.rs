//! # bt-core
//!
//! Core types, error definitions, and formatting helpers for binomialtree.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace – type aliases, the error enum with its
//! early-return macros, the `TimeSeries` observation container, and the
//! text formatters used to inspect lattices.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure_input!` / `ensure_domain!` macros.
pub mod errors;

/// Keyed observation series.
pub mod time_series;

/// Miscellaneous utilities.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A per-step discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A probability in [0, 1].
pub type Probability = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use time_series::TimeSeries;
