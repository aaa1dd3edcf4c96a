//! Random-walk price path simulation.
//!
//! Independent of the lattice: paths are generated by the discrete
//! multiplicative walk
//!
//! `S[k+1] = S[k] · (1 + μΔt + σ√Δt · ε[k])`
//!
//! with shocks `ε` from a seeded generator.
//!
//! * [`RandomWalk`] — validated walk specification
//! * [`PathGenerator`] — draws successive [`Path`]s
//! * [`ShockKind`] — Irwin–Hall or Gaussian shocks

use bt_core::{ensure_input, errors::Result, Price, Rate, Real, Time, Volatility};
use bt_math::random_numbers::{GaussianRng, IrwinHallRng, NormalDeviates};
use bt_math::statistics::simple_returns;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A single sample path: a sequence of time-value pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Time points (including t=0).
    pub times: Vec<Real>,
    /// Simulated prices at each time point.
    pub values: Vec<Real>,
}

impl Path {
    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// The initial value.
    pub fn front(&self) -> Option<Real> {
        self.values.first().copied()
    }

    /// The final value.
    pub fn back(&self) -> Option<Real> {
        self.values.last().copied()
    }

    /// Length of the path (number of points including initial).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Simple returns between consecutive points.
    pub fn returns(&self) -> Result<Vec<Real>> {
        simple_returns(&self.values)
    }
}

// ─── RandomWalk ───────────────────────────────────────────────────────────────

/// Distribution of the per-step shocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShockKind {
    /// Sum of 12 grid uniforms minus 6.
    #[default]
    IrwinHall,
    /// Exact standard normal.
    Gaussian,
}

/// Specification of a discrete multiplicative random walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomWalk {
    spot: Price,
    drift: Rate,
    volatility: Volatility,
    time_step: Time,
    points: usize,
}

impl RandomWalk {
    /// Create a walk of `points` values (the spot included) spaced
    /// `time_step` apart.
    pub fn new(
        spot: Price,
        drift: Rate,
        volatility: Volatility,
        time_step: Time,
        points: usize,
    ) -> Result<Self> {
        ensure_input!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive, got {spot}"
        );
        ensure_input!(drift.is_finite(), "drift must be finite, got {drift}");
        ensure_input!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative, got {volatility}"
        );
        ensure_input!(
            time_step.is_finite() && time_step > 0.0,
            "time step must be positive, got {time_step}"
        );
        ensure_input!(points >= 1, "a path needs at least one point");
        Ok(Self {
            spot,
            drift,
            volatility,
            time_step,
            points,
        })
    }

    /// Number of points per path.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Step length.
    pub fn time_step(&self) -> Time {
        self.time_step
    }

    /// A generator drawing shocks of `kind` from `seed`.
    pub fn generator(&self, kind: ShockKind, seed: u64) -> PathGenerator {
        let rng: Box<dyn NormalDeviates + Send> = match kind {
            ShockKind::IrwinHall => Box::new(IrwinHallRng::new(seed)),
            ShockKind::Gaussian => Box::new(GaussianRng::new(seed)),
        };
        PathGenerator::with_rng(*self, rng)
    }

    /// Generate a single path.
    pub fn simulate(&self, kind: ShockKind, seed: u64) -> Path {
        self.generator(kind, seed).next_path()
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Draws successive paths of a [`RandomWalk`] from one shock stream.
pub struct PathGenerator {
    walk: RandomWalk,
    rng: Box<dyn NormalDeviates + Send>,
}

impl PathGenerator {
    /// Create a generator over an arbitrary shock source.
    pub fn with_rng(walk: RandomWalk, rng: Box<dyn NormalDeviates + Send>) -> Self {
        Self { walk, rng }
    }

    /// Generate one sample path.
    pub fn next_path(&mut self) -> Path {
        let RandomWalk {
            spot,
            drift,
            volatility,
            time_step,
            points,
        } = self.walk;
        let drift_term = drift * time_step;
        let diffusion = volatility * time_step.sqrt();

        let mut times = Vec::with_capacity(points);
        let mut values = Vec::with_capacity(points);
        times.push(0.0);
        values.push(spot);

        let mut s = spot;
        for k in 1..points {
            let shock = self.rng.next_deviate();
            s *= 1.0 + drift_term + diffusion * shock;
            times.push(k as Real * time_step);
            values.push(s);
        }
        debug!(points, last = s, "simulated random-walk path");

        Path { times, values }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    struct Fixed(Real);

    impl NormalDeviates for Fixed {
        fn next_deviate(&mut self) -> Real {
            self.0
        }
    }

    #[test]
    fn deterministic_shocks_give_geometric_path() {
        let walk = RandomWalk::new(100.0, 0.15, 0.25, 0.01, 4).unwrap();
        let mut gen = PathGenerator::with_rng(walk, Box::new(Fixed(1.0)));
        let path = gen.next_path();
        let factor: Real = 1.0 + 0.15 * 0.01 + 0.25 * 0.1;
        assert_eq!(path.len(), 4);
        assert_eq!(path.steps(), 3);
        assert_eq!(path.front(), Some(100.0));
        assert_abs_diff_eq!(path.back().unwrap(), 100.0 * factor.powi(3), epsilon = 1e-10);
        assert_abs_diff_eq!(path.times[3], 0.03, epsilon = 1e-15);
        for r in path.returns().unwrap() {
            assert_abs_diff_eq!(r, factor - 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_volatility_is_pure_drift() {
        let walk = RandomWalk::new(50.0, 0.1, 0.0, 0.5, 3).unwrap();
        let path = walk.simulate(ShockKind::Gaussian, 1);
        assert_abs_diff_eq!(path.values[2], 50.0 * 1.05 * 1.05, epsilon = 1e-12);
    }

    #[test]
    fn same_seed_same_path() {
        let walk = RandomWalk::new(100.0, 0.15, 0.25, 0.01, 1000).unwrap();
        for kind in [ShockKind::IrwinHall, ShockKind::Gaussian] {
            assert_eq!(walk.simulate(kind, 42), walk.simulate(kind, 42));
            assert_ne!(walk.simulate(kind, 42), walk.simulate(kind, 43));
        }
    }

    #[test]
    fn single_point_path_is_the_spot() {
        let walk = RandomWalk::new(100.0, 0.1, 0.2, 0.01, 1).unwrap();
        let path = walk.simulate(ShockKind::IrwinHall, 0);
        assert_eq!(path.values, vec![100.0]);
        assert!(path.returns().is_err());
    }

    #[test]
    fn invalid_walks_rejected() {
        assert!(RandomWalk::new(0.0, 0.1, 0.2, 0.01, 10).is_err());
        assert!(RandomWalk::new(100.0, 0.1, -0.2, 0.01, 10).is_err());
        assert!(RandomWalk::new(100.0, 0.1, 0.2, 0.0, 10).is_err());
        assert!(RandomWalk::new(100.0, 0.1, 0.2, 0.01, 0).is_err());
    }
}
