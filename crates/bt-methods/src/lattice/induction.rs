//! Backward induction of option values through an asset lattice.

use bt_core::{ensure_domain, errors::Result, DiscountFactor, Price, Probability, Real};
use tracing::trace;

use super::{AssetLattice, OptionLattice, Payoff, TriangularLattice};

/// Collapse `asset` into the option-value lattice.
///
/// The terminal row holds `payoff(S[N][i], K)`.  Each earlier node takes
/// the discounted risk-neutral expectation of its two successors,
///
/// `V[n−1][i] = df · (p · V[n][i] + (1 − p) · V[n][i+1])`,
///
/// and, with `early_exercise`, is replaced by the immediate payoff only when
/// that payoff is strictly greater.  Rows are produced from step `N` down
/// to step 0; the asset lattice is only read.
///
/// Fails with `NumericDomain` if `p ∉ [0, 1]`, if `df` is not a positive
/// finite number, or if the payoff yields a negative or non-finite value.
pub fn collapse(
    asset: &AssetLattice,
    payoff: &Payoff,
    strike: Price,
    up_probability: Probability,
    discount_factor: DiscountFactor,
    early_exercise: bool,
) -> Result<OptionLattice> {
    let p = up_probability;
    let df = discount_factor;
    ensure_domain!(
        (0.0..=1.0).contains(&p),
        "risk-neutral probability {p} outside [0, 1]"
    );
    ensure_domain!(
        df.is_finite() && df > 0.0,
        "discount factor must be positive, got {df}"
    );

    let n = asset.steps();
    let mut rows: Vec<Vec<Real>> = Vec::with_capacity(n + 1);

    let mut terminal = Vec::with_capacity(n + 1);
    for &s in asset.terminal() {
        terminal.push(exercise_value(payoff, s, strike)?);
    }
    rows.push(terminal);

    for step in (1..=n).rev() {
        let next = &rows[n - step];
        let prices = &asset.rows()[step - 1];
        let mut row = Vec::with_capacity(step);
        for i in 0..step {
            let continuation = df * (p * next[i] + (1.0 - p) * next[i + 1]);
            let value = if early_exercise {
                let exercise = exercise_value(payoff, prices[i], strike)?;
                if exercise > continuation {
                    exercise
                } else {
                    continuation
                }
            } else {
                continuation
            };
            row.push(value);
        }
        trace!(step = step - 1, root_candidate = row[0], "rolled back lattice row");
        rows.push(row);
    }

    rows.reverse();
    Ok(TriangularLattice::from_rows(rows))
}

#[inline]
fn exercise_value(payoff: &Payoff, price: Price, strike: Price) -> Result<Real> {
    let value = payoff.value(price, strike);
    ensure_domain!(
        value.is_finite() && value >= 0.0,
        "payoff '{}' returned {value} at S = {price}, K = {strike}",
        payoff.name()
    );
    Ok(value)
}
