//! Pricer configuration.
//!
//! [`PricerConfig`] selects the lattice model and bounds the step count a
//! [`LatticePricer`](crate::lattice::LatticePricer) accepts.  It can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! model = "cox_ross_rubinstein"   # or "linear" / "crr"
//! max_steps = 5000
//! ```
//!
//! Missing keys fall back to [`PricerConfig::default`].

use bt_core::{errors::Result, Error};
use serde::{Deserialize, Serialize};

use crate::lattice::LatticeModel;

/// Default upper bound on the number of lattice steps.
pub const DEFAULT_MAX_STEPS: usize = 5_000;

/// Lattice pricer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    /// Parameter-derivation model.
    pub model: LatticeModel,
    /// Largest step count accepted; requests above it are rejected.
    pub max_steps: usize,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            model: LatticeModel::CoxRossRubinstein,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl PricerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::Config("max_steps must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = PricerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PricerConfig::default());
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn parses_model_and_limit() {
        let config = PricerConfig::from_toml_str("model = \"linear\"\nmax_steps = 250\n").unwrap();
        assert_eq!(config.model, LatticeModel::Linear);
        assert_eq!(config.max_steps, 250);
        let config = PricerConfig::from_toml_str("model = \"crr\"").unwrap();
        assert_eq!(config.model, LatticeModel::CoxRossRubinstein);
    }

    #[test]
    fn rejects_bad_documents() {
        for source in [
            "max_steps = 0",
            "model = \"trinomial\"",
            "max_step = 10",
            "max_steps = -3",
        ] {
            let err = PricerConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{source}: {err}");
        }
    }
}
