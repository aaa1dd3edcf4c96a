//! Binomial lattice methods for option pricing.
//!
//! Pricing runs in two phases.  BUILD derives the per-step parameters and
//! rolls the asset lattice forward from the spot; COLLAPSE rolls option
//! values backward from the terminal payoffs to the root.  Neither phase
//! touches the other's lattice, and both lattices are returned with the
//! price.
//!
//! # Overview
//!
//! * [`LatticeParameters`] / [`LatticeModel`] — linear and Cox-Ross-Rubinstein
//!   parameterisations
//! * [`build_asset_lattice`] — forward asset-price lattice
//! * [`Payoff`] — call, put, or injected payoff function
//! * [`collapse`] — backward induction with optional early exercise
//! * [`price`] / [`LatticePricer`] — pricing entry points

pub mod asset_tree;
pub mod induction;
pub mod parameters;
pub mod payoff;
pub mod pricing;

pub use asset_tree::build_asset_lattice;
pub use induction::collapse;
pub use parameters::{LatticeModel, LatticeParameters};
pub use payoff::{OptionType, Payoff, PayoffFn};
pub use pricing::{
    price, price_cox_ross_rubinstein, price_linear, LatticePricer, PricingRequest, PricingResult,
};

use std::fmt;
use std::ops::Index;

use bt_core::utilities::format_lattice;
use bt_core::Real;
use serde::Serialize;

// ─── TriangularLattice ────────────────────────────────────────────────────────

/// A triangular array of node values indexed by `(step, node)`.
///
/// Row `k` always holds exactly `k + 1` values and there is at least one
/// row, so renderers can rely on the shape without re-validating.  Node 0
/// of each row is the all-up path.  Lattices are only created by
/// [`build_asset_lattice`] and [`collapse`] and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TriangularLattice {
    rows: Vec<Vec<Real>>,
}

/// Lattice of underlying asset prices.
pub type AssetLattice = TriangularLattice;

/// Lattice of option present values.
pub type OptionLattice = TriangularLattice;

impl TriangularLattice {
    pub(crate) fn from_rows(rows: Vec<Vec<Real>>) -> Self {
        debug_assert!(!rows.is_empty(), "lattice needs at least one row");
        debug_assert!(
            rows.iter().enumerate().all(|(k, row)| row.len() == k + 1),
            "lattice rows must be triangular"
        );
        Self { rows }
    }

    /// Number of time steps (= rows − 1).
    pub fn steps(&self) -> usize {
        self.rows.len() - 1
    }

    /// Number of nodes at step `i` (always `i + 1`).
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        let n = self.rows.len();
        n * (n + 1) / 2
    }

    /// Value at the root node `(0, 0)`.
    pub fn root(&self) -> Real {
        self.rows[0][0]
    }

    /// Values at the final step.
    pub fn terminal(&self) -> &[Real] {
        &self.rows[self.rows.len() - 1]
    }

    /// Row at `step`, or `None` past the final step.
    pub fn row(&self, step: usize) -> Option<&[Real]> {
        self.rows.get(step).map(Vec::as_slice)
    }

    /// Value at `(step, node)`, or `None` outside the triangle.
    pub fn get(&self, step: usize, node: usize) -> Option<Real> {
        self.rows.get(step).and_then(|row| row.get(node)).copied()
    }

    /// All rows, root first.
    pub fn rows(&self) -> &[Vec<Real>] {
        &self.rows
    }

    /// Consume the lattice, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<Real>> {
        self.rows
    }

    /// Render the lattice as an indented pyramid with `decimals` places.
    pub fn to_text(&self, decimals: usize) -> String {
        format_lattice(&self.rows, decimals)
    }
}

impl Index<(usize, usize)> for TriangularLattice {
    type Output = Real;

    fn index(&self, (step, node): (usize, usize)) -> &Real {
        &self.rows[step][node]
    }
}

impl fmt::Display for TriangularLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(2))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TriangularLattice {
        TriangularLattice::from_rows(vec![vec![1.0], vec![2.0, 3.0], vec![4.0, 5.0, 6.0]])
    }

    #[test]
    fn accessors() {
        let l = sample();
        assert_eq!(l.steps(), 2);
        assert_eq!(l.size(2), 3);
        assert_eq!(l.node_count(), 6);
        assert_eq!(l.root(), 1.0);
        assert_eq!(l.terminal(), &[4.0, 5.0, 6.0]);
        assert_eq!(l.get(1, 1), Some(3.0));
        assert_eq!(l.get(1, 2), None);
        assert_eq!(l.get(3, 0), None);
        assert_eq!(l[(2, 1)], 5.0);
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let text = sample().to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().last().unwrap().contains("  4.00      5.00      6.00"));
    }

    #[test]
    fn serialises_as_nested_arrays() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "[[1.0],[2.0,3.0],[4.0,5.0,6.0]]");
    }
}
