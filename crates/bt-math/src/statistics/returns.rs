//! Return-distribution analysis of a price history.
//!
//! Given observed prices this module computes simple returns, standardises
//! them, buckets them into a density histogram next to the standard normal
//! density, produces QQ points against the normal quantiles, and measures
//! how return moments scale with the sampling interval.

use bt_core::{ensure_input, errors::Result, Real, TimeSeries};
use serde::Serialize;

use super::Statistics;
use crate::distributions::{normal_cdf_inverse, normal_pdf};

/// Trading days used to annualise daily moments.
pub const TRADING_DAYS_PER_YEAR: Real = 252.0;

fn ensure_finite(samples: &[Real], what: &str) -> Result<()> {
    if let Some(i) = samples.iter().position(|x| !x.is_finite()) {
        return Err(bt_core::Error::InvalidInput(format!(
            "{what}[{i}] is not finite"
        )));
    }
    Ok(())
}

/// Simple returns `(p[i] − p[i−1]) / p[i−1]` of a price sequence.
///
/// The result has one element fewer than `prices`.
pub fn simple_returns(prices: &[Real]) -> Result<Vec<Real>> {
    ensure_input!(
        prices.len() >= 2,
        "at least 2 prices are needed for a return, got {}",
        prices.len()
    );
    ensure_finite(prices, "prices")?;
    prices
        .windows(2)
        .map(|w| {
            ensure_input!(w[0] > 0.0, "prices must be positive, got {}", w[0]);
            Ok((w[1] - w[0]) / w[0])
        })
        .collect()
}

/// Simple returns of a keyed series, keyed by the later observation.
pub fn simple_returns_series<K: Ord + Clone>(prices: &TimeSeries<K>) -> Result<TimeSeries<K>> {
    let keys = prices.keys();
    let returns = simple_returns(&prices.values())?;
    TimeSeries::from_key_values(&keys[1..], &returns)
}

/// Standardise samples to zero mean and unit (sample) standard deviation.
pub fn scaled_returns(returns: &[Real]) -> Result<Vec<Real>> {
    let summary = ReturnSummary::from_returns(returns)?;
    ensure_input!(
        summary.std_dev > 0.0,
        "returns have zero dispersion and cannot be scaled"
    );
    Ok(returns
        .iter()
        .map(|r| (r - summary.mean) / summary.std_dev)
        .collect())
}

// ─── ReturnSummary ────────────────────────────────────────────────────────────

/// Descriptive statistics of a return series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSummary {
    /// Number of returns.
    pub count: usize,
    /// Sample mean.
    pub mean: Real,
    /// Bessel-corrected standard deviation.
    pub std_dev: Real,
    /// Smallest return.
    pub minimum: Real,
    /// Largest return.
    pub maximum: Real,
}

impl ReturnSummary {
    /// Summarise a return series; needs at least two finite samples.
    pub fn from_returns(returns: &[Real]) -> Result<Self> {
        ensure_input!(
            returns.len() >= 2,
            "at least 2 returns are needed, got {}",
            returns.len()
        );
        ensure_finite(returns, "returns")?;
        let stats: Statistics = returns.iter().copied().collect();
        match (
            stats.mean(),
            stats.std_dev(),
            stats.minimum(),
            stats.maximum(),
        ) {
            (Some(mean), Some(std_dev), Some(minimum), Some(maximum)) => Ok(Self {
                count: stats.samples(),
                mean,
                std_dev,
                minimum,
                maximum,
            }),
            _ => Err(bt_core::Error::InvalidInput(
                "return series too short to summarise".into(),
            )),
        }
    }
}

// ─── ReturnHistogram ──────────────────────────────────────────────────────────

/// Equal-width density histogram of samples, paired with the standard
/// normal density at each bucket mid-point.
///
/// Buckets span `[min, max]`; every bucket is half-open on the right except
/// the last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnHistogram {
    edges: Vec<Real>,
    counts: Vec<usize>,
    density: Vec<Real>,
    normal_density: Vec<Real>,
    bucket_width: Real,
}

impl ReturnHistogram {
    /// Bucket `samples` into `bucket_count` equal-width buckets.
    pub fn new(samples: &[Real], bucket_count: usize) -> Result<Self> {
        ensure_input!(bucket_count >= 1, "bucket count must be >= 1");
        ensure_input!(!samples.is_empty(), "cannot bucket an empty sample");
        ensure_finite(samples, "samples")?;

        let min = samples.iter().copied().fold(Real::INFINITY, Real::min);
        let max = samples.iter().copied().fold(Real::NEG_INFINITY, Real::max);
        ensure_input!(max > min, "samples span no range (all equal to {min})");

        let bucket_width = (max - min) / bucket_count as Real;
        let edges: Vec<Real> = (0..=bucket_count)
            .map(|i| min + i as Real * bucket_width)
            .collect();

        let mut counts = vec![0usize; bucket_count];
        for &x in samples {
            let idx = (((x - min) / bucket_width) as usize).min(bucket_count - 1);
            counts[idx] += 1;
        }

        let n = samples.len() as Real;
        let density = counts
            .iter()
            .map(|&c| c as Real / n / bucket_width)
            .collect();
        let normal_density = edges[..bucket_count]
            .iter()
            .map(|left| normal_pdf(left + 0.5 * bucket_width))
            .collect();

        Ok(Self {
            edges,
            counts,
            density,
            normal_density,
            bucket_width,
        })
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    /// Width of every bucket.
    pub fn bucket_width(&self) -> Real {
        self.bucket_width
    }

    /// Bucket edges, `bucket_count + 1` values from min to max.
    pub fn edges(&self) -> &[Real] {
        &self.edges
    }

    /// Bucket mid-points.
    pub fn midpoints(&self) -> Vec<Real> {
        self.edges
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .collect()
    }

    /// Samples per bucket.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Empirical density per bucket: `count / (n · width)`.
    pub fn density(&self) -> &[Real] {
        &self.density
    }

    /// Standard normal density at each bucket mid-point.
    pub fn normal_density(&self) -> &[Real] {
        &self.normal_density
    }
}

// ─── QQ points ────────────────────────────────────────────────────────────────

/// Quantile–quantile points of `samples` against the standard normal.
///
/// Returns `(theoretical, empirical)` pairs sorted ascending, using the
/// plotting positions `(i + 0.5) / n`.
pub fn qq_points(samples: &[Real]) -> Result<Vec<(Real, Real)>> {
    ensure_input!(!samples.is_empty(), "cannot build QQ points of an empty sample");
    ensure_finite(samples, "samples")?;
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as Real;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, x)| Ok((normal_cdf_inverse((i as Real + 0.5) / n)?, x)))
        .collect()
}

// ─── Sampling-interval analysis ───────────────────────────────────────────────

/// Return moments observed when sampling prices every `interval` periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalMoments {
    /// Sampling interval in periods.
    pub interval: usize,
    /// Mean of the sub-sampled returns.
    pub mean: Real,
    /// Standard deviation of the sub-sampled returns.
    pub std_dev: Real,
    /// `mean / (interval / periods_per_year)`.
    pub annualised_drift: Real,
    /// `std_dev / √(interval / periods_per_year)`.
    pub annualised_volatility: Real,
}

/// Measure return moments for every sampling interval `1..=max_interval`.
///
/// For interval `t` the prices are sub-sampled every `t`-th observation
/// starting with the first; at least two returns must remain.
pub fn sampling_interval_analysis(
    prices: &[Real],
    max_interval: usize,
    periods_per_year: Real,
) -> Result<Vec<IntervalMoments>> {
    ensure_input!(max_interval >= 1, "max interval must be >= 1");
    ensure_input!(
        periods_per_year > 0.0,
        "periods per year must be positive, got {periods_per_year}"
    );
    (1..=max_interval)
        .map(|interval| {
            let sampled: Vec<Real> = prices.iter().copied().step_by(interval).collect();
            ensure_input!(
                sampled.len() >= 3,
                "interval {interval} leaves {} prices, need at least 3",
                sampled.len()
            );
            let summary = ReturnSummary::from_returns(&simple_returns(&sampled)?)?;
            let dt = interval as Real / periods_per_year;
            Ok(IntervalMoments {
                interval,
                mean: summary.mean,
                std_dev: summary.std_dev,
                annualised_drift: summary.mean / dt,
                annualised_volatility: summary.std_dev / dt.sqrt(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn simple_returns_match_definition() {
        let r = simple_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(r.len(), 2);
        assert_abs_diff_eq!(r[0], 0.1, epsilon = 1e-15);
        assert_abs_diff_eq!(r[1], -0.1, epsilon = 1e-15);
    }

    #[test]
    fn simple_returns_rejects_bad_prices() {
        assert!(simple_returns(&[100.0]).unwrap_err().is_invalid_input());
        assert!(simple_returns(&[0.0, 1.0]).unwrap_err().is_invalid_input());
        assert!(simple_returns(&[1.0, f64::NAN]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn keyed_returns_use_later_key() {
        let ts = TimeSeries::from_key_values(&[1, 2, 3], &[100.0, 110.0, 99.0]).unwrap();
        let r = simple_returns_series(&ts).unwrap();
        assert_eq!(r.keys(), vec![2, 3]);
        assert_abs_diff_eq!(r.get(&3).unwrap(), -0.1, epsilon = 1e-15);
    }

    #[test]
    fn scaled_returns_are_standardised() {
        let scaled = scaled_returns(&[0.01, -0.02, 0.03, 0.0, 0.015]).unwrap();
        let summary = ReturnSummary::from_returns(&scaled).unwrap();
        assert_abs_diff_eq!(summary.mean, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.std_dev, 1.0, epsilon = 1e-12);
        assert!(scaled_returns(&[0.01, 0.01]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn histogram_counts_every_sample() {
        let samples = [-2.0, -1.0, -0.5, 0.0, 0.0, 0.5, 1.0, 2.0];
        let h = ReturnHistogram::new(&samples, 4).unwrap();
        assert_eq!(h.bucket_count(), 4);
        assert_eq!(h.edges().len(), 5);
        assert_abs_diff_eq!(h.bucket_width(), 1.0, epsilon = 1e-15);
        assert_eq!(h.counts(), &[1, 2, 3, 2]);
        let area: Real = h.density().iter().map(|d| d * h.bucket_width()).sum();
        assert_abs_diff_eq!(area, 1.0, epsilon = 1e-12);
        assert_eq!(h.midpoints(), vec![-1.5, -0.5, 0.5, 1.5]);
        assert_abs_diff_eq!(h.normal_density()[1], normal_pdf(-0.5), epsilon = 1e-15);
    }

    #[test]
    fn histogram_rejects_degenerate_input() {
        assert!(ReturnHistogram::new(&[], 10).is_err());
        assert!(ReturnHistogram::new(&[1.0, 1.0], 10).is_err());
        assert!(ReturnHistogram::new(&[0.0, 1.0], 0).is_err());
    }

    #[test]
    fn qq_points_are_symmetric_for_symmetric_sample() {
        let pts = qq_points(&[1.0, -1.0, 0.0]).unwrap();
        assert_eq!(pts.len(), 3);
        assert_abs_diff_eq!(pts[1].0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[0].0, -pts[2].0, epsilon = 1e-12);
        assert_eq!(pts[0].1, -1.0);
        assert_eq!(pts[2].1, 1.0);
    }

    #[test]
    fn interval_analysis_of_geometric_series() {
        // Constant 1% growth per period: every sub-sampled return is
        // (1.01^t − 1) with zero dispersion.
        let prices: Vec<Real> = (0..50).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let moments = sampling_interval_analysis(&prices, 3, TRADING_DAYS_PER_YEAR).unwrap();
        assert_eq!(moments.len(), 3);
        for m in &moments {
            let expected = 1.01_f64.powi(m.interval as i32) - 1.0;
            assert_abs_diff_eq!(m.mean, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(m.std_dev, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(
                m.annualised_drift,
                expected * TRADING_DAYS_PER_YEAR / m.interval as Real,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn interval_analysis_needs_enough_prices() {
        let prices = [100.0, 101.0, 102.0, 103.0];
        assert!(sampling_interval_analysis(&prices, 1, 252.0).is_ok());
        assert!(sampling_interval_analysis(&prices, 2, 252.0).is_err());
    }
}
