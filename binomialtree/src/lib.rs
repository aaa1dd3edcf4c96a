//! # binomialtree
//!
//! Binomial lattice option pricing.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `bt-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use binomialtree::methods::{price_cox_ross_rubinstein, Payoff, PricingRequest};
//!
//! let request = PricingRequest::new(100.0, 100.0, 0.2, 0.1, 1.0 / 3.0, 4);
//! let call = price_cox_ross_rubinstein(&request).unwrap();
//! assert_eq!(call.value, call.option_lattice.root());
//! assert_eq!(call.asset_lattice.root(), 100.0);
//!
//! let put = request.with_payoff(Payoff::Put).with_early_exercise(true);
//! let american = price_cox_ross_rubinstein(&put).unwrap();
//! println!("{}", american.option_lattice);
//! ```
//!
//! Lattices render as indented pyramids, and every result serialises with
//! serde so it can be handed to a report or a plotting front end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and formatters.
pub use bt_core as core;

/// Normal distribution, statistics, return analysis, RNG.
pub use bt_math as math;

/// Lattice pricing, configuration, and random-walk simulation.
pub use bt_methods as methods;

pub use bt_core::{Error, Result};
