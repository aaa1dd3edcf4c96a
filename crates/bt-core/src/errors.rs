//! Error types for binomialtree.
//!
//! Every fallible operation in the workspace returns the single
//! `thiserror`-derived [`Error`] enum.  Input validation failures and
//! numeric-domain failures are kept apart so callers can tell a bad request
//! from a parameter combination the lattice cannot represent.  The
//! [`ensure_input!`](crate::ensure_input) and
//! [`ensure_domain!`](crate::ensure_domain) macros return early with the
//! matching variant.

use thiserror::Error;

/// The top-level error type used throughout binomialtree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A request argument is out of range (non-positive spot, strike,
    /// volatility, expiry, or step count; non-finite values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Derived quantities left their mathematical domain (risk-neutral
    /// probability outside `[0, 1]`, negative radicand, non-positive
    /// down factor).
    #[error("numeric domain error: {0}")]
    NumericDomain(String),

    /// A configuration document could not be parsed or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error was raised by input validation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Whether this error was raised by a numeric-domain check.
    pub fn is_numeric_domain(&self) -> bool {
        matches!(self, Error::NumericDomain(_))
    }
}

/// Shorthand `Result` type used throughout binomialtree.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bt_core::{ensure_input, errors::Error};
/// fn positive(x: f64) -> bt_core::errors::Result<f64> {
///     ensure_input!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidInput(_))));
/// ```
#[macro_export]
macro_rules! ensure_input {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::NumericDomain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bt_core::{ensure_domain, errors::Error};
/// fn probability(p: f64) -> bt_core::errors::Result<f64> {
///     ensure_domain!((0.0..=1.0).contains(&p), "p = {p} is not a probability");
///     Ok(p)
/// }
/// assert!(probability(0.4).is_ok());
/// assert!(matches!(probability(1.5), Err(Error::NumericDomain(_))));
/// ```
#[macro_export]
macro_rules! ensure_domain {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::NumericDomain(
                format!($($msg)*)
            ));
        }
    };
}
