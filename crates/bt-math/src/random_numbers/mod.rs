//! Random number generators.
//!
//! Wraps `rand_mt`, `rand`, and `rand_distr` behind seeded generators so
//! that simulated paths are reproducible.
//!
//! * [`MersenneTwisterUniformRng`] — uniform deviates in `[0, 1)`
//! * [`IrwinHallRng`] — approximate normal: sum of 12 grid uniforms minus 6
//! * [`GaussianRng`] — exact standard normal via `rand_distr`

use std::num::NonZeroU32;

use bt_core::Real;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A source of (approximately) standard-normal shocks.
pub trait NormalDeviates {
    /// Draw the next deviate.
    fn next_deviate(&mut self) -> Real;
}

/// `2^-53`, the spacing of doubles in `[0.5, 1)`.
const UNIT_53: Real = 1.0 / (1u64 << 53) as Real;

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    ///
    /// Uses the top 53 bits of the draw, so `1.0` is never returned.
    pub fn next_real(&mut self) -> Real {
        let u: u64 = self.rng.next_u64();
        (u >> 11) as f64 * UNIT_53
    }

    /// Generate an integer uniformly distributed in `1..=n`.
    pub fn next_in_range(&mut self, n: NonZeroU32) -> u32 {
        let n = n.get();
        ((self.next_real() * n as Real) as u32).min(n - 1) + 1
    }
}

/// Irwin–Hall approximation to the standard normal.
///
/// Each deviate is the sum of 12 uniforms drawn from the grid
/// `{1/10000, 2/10000, …, 1}` minus 6: mean ≈ 0, variance ≈ 1, bounded in
/// `[-6, 6]`.
pub struct IrwinHallRng {
    inner: MersenneTwisterUniformRng,
}

impl IrwinHallRng {
    /// Number of uniforms summed per deviate.
    pub const TERMS: usize = 12;

    /// Resolution of each uniform draw.
    pub const GRID: NonZeroU32 = match NonZeroU32::new(10_000) {
        Some(n) => n,
        None => panic!("grid must be non-zero"),
    };

    /// Create a new generator backed by a Mersenne Twister.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl NormalDeviates for IrwinHallRng {
    fn next_deviate(&mut self) -> Real {
        let sum: Real = (0..Self::TERMS)
            .map(|_| self.inner.next_in_range(Self::GRID) as Real / Self::GRID.get() as Real)
            .sum();
        sum - Self::TERMS as Real / 2.0
    }
}

/// Standard-normal generator over a seeded `StdRng`.
pub struct GaussianRng {
    rng: StdRng,
}

impl GaussianRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NormalDeviates for GaussianRng {
    fn next_deviate(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistics;

    #[test]
    fn mt_range() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..1_000 {
            let x = rng.next_real();
            assert!((0.0..1.0).contains(&x));
            let k = rng.next_in_range(NonZeroU32::new(10).unwrap());
            assert!((1..=10).contains(&k));
        }
    }

    #[test]
    fn unit_range_excludes_one() {
        // The largest 53-bit mantissa maps just below 1.0.
        assert_eq!((u64::MAX >> 11) as f64 * UNIT_53, 1.0 - UNIT_53);
        assert!((u64::MAX >> 11) as f64 * UNIT_53 < 1.0);
        let mut rng = MersenneTwisterUniformRng::new(0);
        assert_eq!(rng.next_in_range(NonZeroU32::MIN), 1);
    }

    #[test]
    fn irwin_hall_moments() {
        let mut rng = IrwinHallRng::new(7);
        let s: Statistics = (0..20_000).map(|_| rng.next_deviate()).collect();
        assert!(s.mean().unwrap().abs() < 0.05, "mean {:?}", s.mean());
        assert!((s.variance().unwrap() - 1.0).abs() < 0.05, "var {:?}", s.variance());
        assert!(s.minimum().unwrap() >= -6.0 && s.maximum().unwrap() <= 6.0);
    }

    #[test]
    fn gaussian_moments() {
        let mut rng = GaussianRng::new(11);
        let s: Statistics = (0..20_000).map(|_| rng.next_deviate()).collect();
        assert!(s.mean().unwrap().abs() < 0.05, "mean {:?}", s.mean());
        assert!((s.variance().unwrap() - 1.0).abs() < 0.05, "var {:?}", s.variance());
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = IrwinHallRng::new(3);
        let mut b = IrwinHallRng::new(3);
        for _ in 0..100 {
            assert_eq!(a.next_deviate(), b.next_deviate());
        }
    }
}
