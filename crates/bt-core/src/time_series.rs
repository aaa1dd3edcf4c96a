//! Keyed observation series.
//!
//! [`TimeSeries`] holds historical observations (typically adjusted closing
//! prices) ordered by an arbitrary key, usually a date or an integer
//! sequence number.  The return-analysis code in `bt-math` consumes the
//! values in key order.

use std::collections::BTreeMap;

use crate::{ensure_input, errors::Result, Real};

/// An ordered map from key to observation, backed by a `BTreeMap`.
///
/// Missing keys return `None`; inserting an existing key overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone> {
    data: BTreeMap<K, Real>,
}

impl<K: Ord + Clone> Default for TimeSeries<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> std::iter::FromIterator<(K, Real)> for TimeSeries<K> {
    fn from_iter<I: IntoIterator<Item = (K, Real)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone> TimeSeries<K> {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Build from parallel slices of keys and observations.
    ///
    /// Fails with `InvalidInput` if the slices differ in length.
    pub fn from_key_values(keys: &[K], values: &[Real]) -> Result<Self> {
        ensure_input!(
            keys.len() == values.len(),
            "keys ({}) and values ({}) must have the same length",
            keys.len(),
            values.len()
        );
        Ok(keys.iter().cloned().zip(values.iter().copied()).collect())
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The earliest key, or `None` if empty.
    pub fn first_key(&self) -> Option<&K> {
        self.data.keys().next()
    }

    /// The latest key, or `None` if empty.
    pub fn last_key(&self) -> Option<&K> {
        self.data.keys().next_back()
    }

    // ── Element access ───────────────────────────────────────────────────

    /// Look up an observation by key.
    pub fn get(&self, key: &K) -> Option<Real> {
        self.data.get(key).copied()
    }

    /// Insert or overwrite an observation.
    pub fn insert(&mut self, key: K, value: Real) {
        self.data.insert(key, value);
    }

    // ── Bulk access ──────────────────────────────────────────────────────

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.data.keys().cloned().collect()
    }

    /// All observations in key-ascending order.
    pub fn values(&self) -> Vec<Real> {
        self.data.values().copied().collect()
    }

    /// Iterate over `(&K, Real)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Real)> {
        self.data.iter().map(|(k, v)| (k, *v))
    }

    /// Keep every `step`-th observation, starting with the first.
    ///
    /// `step = 1` returns a copy of the series.
    pub fn every_nth(&self, step: usize) -> Result<Self> {
        ensure_input!(step >= 1, "sampling step must be >= 1, got {step}");
        Ok(self
            .data
            .iter()
            .step_by(step)
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }
}

impl<K: Ord + Clone + std::fmt::Debug> std::fmt::Display for TimeSeries<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, v) in &self.data {
            writeln!(f, "{k:?} => {v}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
