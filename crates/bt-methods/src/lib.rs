//! # bt-methods
//!
//! Numerical methods: the binomial lattice pricing engine and the
//! random-walk path simulator.
//!
//! # Modules
//!
//! * [`lattice`] — parameter derivation, asset lattice, payoffs, backward
//!   induction, and the pricing entry points
//! * [`monte_carlo`] — seeded random-walk path generation
//! * [`config`] — model selection and step-count limit for the pricer

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Pricer configuration loaded from code or TOML.
pub mod config;

/// Binomial lattices and backward-induction pricing.
pub mod lattice;

/// Random-walk simulation.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::PricerConfig;
pub use lattice::{
    build_asset_lattice, collapse, price, price_cox_ross_rubinstein, price_linear, AssetLattice,
    LatticeModel, LatticeParameters, LatticePricer, OptionLattice, OptionType, Payoff,
    PricingRequest, PricingResult, TriangularLattice,
};
pub use monte_carlo::{Path, PathGenerator, RandomWalk, ShockKind};
