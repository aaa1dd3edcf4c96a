//! Per-step lattice parameters.
//!
//! Two parameterisations of the recombining binomial lattice are provided:
//!
//! | Model | Up factor | Down factor | Up probability |
//! |---|---|---|---|
//! | [`LatticeModel::Linear`] | `1 + σ√Δt` | `1 − σ√Δt` | `½ + ½ (r/σ) √Δt` |
//! | [`LatticeModel::CoxRossRubinstein`] | `A + √(A² − 1)` | `1 / u` | `(e^{rΔt} − d) / (u − d)` |
//!
//! where `A = ½ (e^{−rΔt} + e^{(r+σ²)Δt})`.  Both discount with
//! `e^{−rΔt}` per step.  The two agree only in the continuous-time limit,
//! so they produce different lattices for the same inputs.

use std::fmt;
use std::str::FromStr;

use bt_core::{
    ensure_domain, ensure_input, errors::Result, DiscountFactor, Error, Probability, Rate, Real,
    Time, Volatility,
};
use serde::{Deserialize, Serialize};

/// Parameter-derivation strategy of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticeModel {
    /// First-order (normal) approximation with additive jumps `1 ± σ√Δt`.
    Linear,
    /// Lognormal Cox-Ross-Rubinstein parameterisation with `d = 1/u`.
    #[default]
    #[serde(alias = "crr")]
    CoxRossRubinstein,
}

impl LatticeModel {
    /// Derive the per-step parameters for this model.
    pub fn derive(
        self,
        volatility: Volatility,
        risk_free_rate: Rate,
        time_step: Time,
    ) -> Result<LatticeParameters> {
        match self {
            LatticeModel::Linear => {
                LatticeParameters::linear(volatility, risk_free_rate, time_step)
            }
            LatticeModel::CoxRossRubinstein => {
                LatticeParameters::cox_ross_rubinstein(volatility, risk_free_rate, time_step)
            }
        }
    }

    /// Short identifier, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LatticeModel::Linear => "linear",
            LatticeModel::CoxRossRubinstein => "cox_ross_rubinstein",
        }
    }
}

impl fmt::Display for LatticeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(LatticeModel::Linear),
            "cox_ross_rubinstein" | "crr" => Ok(LatticeModel::CoxRossRubinstein),
            other => Err(Error::InvalidInput(format!(
                "unknown lattice model '{other}', expected 'linear' or 'cox_ross_rubinstein'"
            ))),
        }
    }
}

/// Up/down factors, risk-neutral probability, and discount factor of one
/// lattice step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticeParameters {
    /// Multiplicative up factor `u`.
    pub up: Real,
    /// Multiplicative down factor `d`.
    pub down: Real,
    /// Risk-neutral probability of an up move, in `[0, 1]`.
    pub up_probability: Probability,
    /// Per-step discount factor `e^{−rΔt}`.
    pub discount_factor: DiscountFactor,
    /// Step length `Δt` in years.
    pub time_step: Time,
}

impl LatticeParameters {
    // ── Named constructors ───────────────────────────────────────────────

    /// Linear approximation: `u = 1 + σ√Δt`, `d = 1 − σ√Δt`,
    /// `p = ½ + ½ (r/σ) √Δt`.
    ///
    /// Fails with `NumericDomain` when `σ√Δt >= 1` (non-positive down
    /// factor) or when `p` leaves `[0, 1]`; both are cured by more steps.
    pub fn linear(volatility: Volatility, risk_free_rate: Rate, time_step: Time) -> Result<Self> {
        check_inputs(volatility, risk_free_rate, time_step)?;
        let sqrt_dt = time_step.sqrt();
        let jump = volatility * sqrt_dt;
        let up = 1.0 + jump;
        let down = 1.0 - jump;
        ensure_domain!(
            down > 0.0,
            "linear model: down factor {down} <= 0 (σ√Δt = {jump}); use more steps"
        );
        let up_probability = 0.5 + 0.5 * (risk_free_rate / volatility) * sqrt_dt;
        Self {
            up,
            down,
            up_probability,
            discount_factor: (-risk_free_rate * time_step).exp(),
            time_step,
        }
        .checked()
    }

    /// Cox-Ross-Rubinstein parameterisation:
    /// `A = ½ (e^{−rΔt} + e^{(r+σ²)Δt})`, `u = A + √(A² − 1)`, `d = 1/u`,
    /// `p = (e^{rΔt} − d) / (u − d)`.
    ///
    /// Fails with `NumericDomain` if `A² − 1 <= 0` (σ²Δt too small to
    /// separate `u` from `d` in floating point) or `p` leaves `[0, 1]`.
    pub fn cox_ross_rubinstein(
        volatility: Volatility,
        risk_free_rate: Rate,
        time_step: Time,
    ) -> Result<Self> {
        check_inputs(volatility, risk_free_rate, time_step)?;
        let discount_factor = (-risk_free_rate * time_step).exp();
        let growth = ((risk_free_rate + volatility * volatility) * time_step).exp();
        let a = 0.5 * (discount_factor + growth);
        let radicand = a * a - 1.0;
        ensure_domain!(
            radicand > 0.0,
            "CRR model: σ²Δt = {} underflows, up and down factors coincide (radicand {radicand}); use fewer steps",
            volatility * volatility * time_step
        );
        let up = a + radicand.sqrt();
        let down = 1.0 / up;
        ensure_domain!(
            up > down,
            "CRR model: up factor {up} not above down factor {down} (Δt = {time_step}); use fewer steps"
        );
        let up_probability = ((risk_free_rate * time_step).exp() - down) / (up - down);
        Self {
            up,
            down,
            up_probability,
            discount_factor,
            time_step,
        }
        .checked()
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Risk-neutral probability of a down move, `1 − p`.
    pub fn down_probability(&self) -> Probability {
        1.0 - self.up_probability
    }

    fn checked(self) -> Result<Self> {
        ensure_domain!(
            (0.0..=1.0).contains(&self.up_probability),
            "risk-neutral probability {} outside [0, 1] (Δt = {}); use more steps",
            self.up_probability,
            self.time_step
        );
        ensure_domain!(
            self.up.is_finite() && self.down.is_finite() && self.discount_factor.is_finite(),
            "non-finite lattice factors u = {}, d = {}, df = {}",
            self.up,
            self.down,
            self.discount_factor
        );
        Ok(self)
    }
}

fn check_inputs(volatility: Volatility, risk_free_rate: Rate, time_step: Time) -> Result<()> {
    ensure_input!(
        volatility.is_finite() && volatility > 0.0,
        "volatility must be positive, got {volatility}"
    );
    ensure_input!(
        risk_free_rate.is_finite(),
        "risk-free rate must be finite, got {risk_free_rate}"
    );
    ensure_input!(
        time_step.is_finite() && time_step > 0.0,
        "time step must be positive, got {time_step}"
    );
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn crr_is_symmetric_and_martingale() {
        let dt = 1.0 / 12.0;
        let p = LatticeParameters::cox_ross_rubinstein(0.2, 0.1, dt).unwrap();
        assert!(p.up > 1.0);
        assert_abs_diff_eq!(p.up * p.down, 1.0, epsilon = 1e-15);
        // p·u + (1−p)·d equals the one-step growth e^{rΔt}
        let forward = p.up_probability * p.up + p.down_probability() * p.down;
        assert_abs_diff_eq!(forward, (0.1 * dt).exp(), epsilon = 1e-14);
        assert_abs_diff_eq!(p.discount_factor, (-0.1 * dt).exp(), epsilon = 1e-15);
    }

    #[test]
    fn crr_hand_computed_values() {
        let (sigma, r, dt) = (0.2_f64, 0.1_f64, 1.0 / 12.0);
        let df = (-r * dt).exp();
        let a = 0.5 * (df + ((r + sigma * sigma) * dt).exp());
        let u = a + (a * a - 1.0).sqrt();
        let p = LatticeParameters::cox_ross_rubinstein(sigma, r, dt).unwrap();
        assert_eq!(p.up, u);
        assert_eq!(p.down, 1.0 / u);
        assert_eq!(p.up_probability, ((r * dt).exp() - 1.0 / u) / (u - 1.0 / u));
    }

    #[test]
    fn crr_rejects_underflowing_time_step() {
        // σ²Δt = 1e-32: A rounds to exactly 1, so u = d = 1.
        let err = LatticeParameters::cox_ross_rubinstein(1e-8, 0.0, 1e-16).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
        assert!(err.to_string().contains("underflows"), "{err}");
        let err = LatticeParameters::cox_ross_rubinstein(1e-9, 0.1, 1e-12).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
    }

    #[test]
    fn linear_factors() {
        let p = LatticeParameters::linear(0.2, 0.05, 0.25).unwrap();
        assert_abs_diff_eq!(p.up, 1.1, epsilon = 1e-15);
        assert_abs_diff_eq!(p.down, 0.9, epsilon = 1e-15);
        assert_abs_diff_eq!(p.up_probability, 0.5 + 0.5 * 0.25 * 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(p.discount_factor, (-0.0125_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn linear_rejects_probability_above_one() {
        // (r/σ)·√Δt = 5 → p = 3
        let err = LatticeParameters::linear(0.1, 0.5, 1.0).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
    }

    #[test]
    fn linear_rejects_non_positive_down_factor() {
        let err = LatticeParameters::linear(1.5, 0.05, 1.0).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
        let err = LatticeParameters::linear(1.0, 0.0, 1.0).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
    }

    #[test]
    fn models_differ_at_finite_steps() {
        let a = LatticeModel::Linear.derive(0.2, 0.1, 0.25).unwrap();
        let b = LatticeModel::CoxRossRubinstein.derive(0.2, 0.1, 0.25).unwrap();
        assert_ne!(a.up, b.up);
        assert_eq!(a.discount_factor, b.discount_factor);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        for model in [LatticeModel::Linear, LatticeModel::CoxRossRubinstein] {
            assert!(model.derive(0.0, 0.1, 0.1).unwrap_err().is_invalid_input());
            assert!(model.derive(0.2, 0.1, 0.0).unwrap_err().is_invalid_input());
            assert!(model.derive(0.2, f64::NAN, 0.1).unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn model_names_round_trip() {
        for model in [LatticeModel::Linear, LatticeModel::CoxRossRubinstein] {
            assert_eq!(model.to_string().parse::<LatticeModel>().unwrap(), model);
        }
        assert_eq!("CRR".parse::<LatticeModel>().unwrap(), LatticeModel::CoxRossRubinstein);
        assert!("trinomial".parse::<LatticeModel>().is_err());
        assert_eq!(LatticeModel::default(), LatticeModel::CoxRossRubinstein);
    }
}
