//! Forward construction of the underlying asset lattice.

use bt_core::{ensure_input, errors::Result, Price, Real};
use tracing::trace;

use super::{AssetLattice, TriangularLattice};

/// Build the asset-price lattice for `steps` steps.
///
/// Row 0 is `[spot]`.  Row `n` multiplies every node of row `n − 1` by
/// `up` and appends the previous bottom node times `down`, so node 0 is the
/// all-up path and node `n` the all-down path.  Under `d = 1/u` this equals
/// `spot · u^{n−i} · d^i` for node `i`.
pub fn build_asset_lattice(spot: Price, up: Real, down: Real, steps: usize) -> Result<AssetLattice> {
    ensure_input!(
        spot.is_finite() && spot > 0.0,
        "spot must be positive, got {spot}"
    );
    ensure_input!(
        up.is_finite() && down.is_finite() && up > 0.0 && down > 0.0,
        "lattice factors must be positive, got u = {up}, d = {down}"
    );
    ensure_input!(steps >= 1, "step count must be >= 1, got {steps}");

    let mut rows: Vec<Vec<Real>> = Vec::with_capacity(steps + 1);
    rows.push(vec![spot]);
    for n in 1..=steps {
        let prev = &rows[n - 1];
        let mut row = Vec::with_capacity(n + 1);
        row.extend(prev.iter().map(|s| s * up));
        row.push(prev[n - 1] * down);
        rows.push(row);
    }
    trace!(steps, nodes = (steps + 1) * (steps + 2) / 2, "built asset lattice");
    Ok(TriangularLattice::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_step_lattice() {
        let lattice = build_asset_lattice(100.0, 1.1, 0.9, 2).unwrap();
        assert_eq!(lattice.steps(), 2);
        assert_eq!(lattice.row(0), Some(&[100.0][..]));
        assert_eq!(lattice.row(1), Some(&[100.0 * 1.1, 100.0 * 0.9][..]));
        assert_eq!(
            lattice.row(2),
            Some(&[100.0 * 1.1 * 1.1, 100.0 * 0.9 * 1.1, 100.0 * 0.9 * 0.9][..])
        );
    }

    #[test]
    fn recombines_under_symmetric_factors() {
        let u: Real = 1.05;
        let lattice = build_asset_lattice(50.0, u, 1.0 / u, 6).unwrap();
        for n in 0..=6 {
            for i in 0..=n {
                let expected = 50.0 * u.powi(n as i32 - 2 * i as i32);
                assert_abs_diff_eq!(lattice[(n, i)], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(build_asset_lattice(0.0, 1.1, 0.9, 2).unwrap_err().is_invalid_input());
        assert!(build_asset_lattice(100.0, 1.1, -0.1, 2).unwrap_err().is_invalid_input());
        assert!(build_asset_lattice(100.0, 1.1, 0.9, 0).unwrap_err().is_invalid_input());
    }
}
