//! Pricing entry points.
//!
//! [`price`] validates a [`PricingRequest`], derives the step parameters
//! with the chosen [`LatticeModel`], builds the asset lattice, and collapses
//! it to the option value.  [`price_linear`] and
//! [`price_cox_ross_rubinstein`] fix the model; [`LatticePricer`] takes it
//! from a [`PricerConfig`] and enforces the configured step limit.

use bt_core::{ensure_input, errors::Result, Price, Rate, Real, Time, Volatility};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    build_asset_lattice, collapse, AssetLattice, LatticeModel, LatticeParameters, OptionLattice,
    Payoff,
};
use crate::config::PricerConfig;

// ─── PricingRequest ───────────────────────────────────────────────────────────

/// Inputs of a single lattice pricing.
#[derive(Debug, Clone, Serialize)]
pub struct PricingRequest {
    /// Spot price of the underlying.
    pub spot: Price,
    /// Strike price.
    pub strike: Price,
    /// Annualised volatility σ.
    pub volatility: Volatility,
    /// Continuously compounded risk-free rate r.
    pub risk_free_rate: Rate,
    /// Time to expiry in years.
    pub expiry: Time,
    /// Number of lattice steps N.
    pub steps: usize,
    /// Whether the option may be exercised at every node (American style).
    pub early_exercise: bool,
    /// Exercise payoff.
    pub payoff: Payoff,
}

impl PricingRequest {
    /// A European call with the given market data and step count.
    pub fn new(
        spot: Price,
        strike: Price,
        volatility: Volatility,
        risk_free_rate: Rate,
        expiry: Time,
        steps: usize,
    ) -> Self {
        Self {
            spot,
            strike,
            volatility,
            risk_free_rate,
            expiry,
            steps,
            early_exercise: false,
            payoff: Payoff::Call,
        }
    }

    /// Set whether early exercise is allowed.
    pub fn with_early_exercise(mut self, early_exercise: bool) -> Self {
        self.early_exercise = early_exercise;
        self
    }

    /// Replace the payoff.
    pub fn with_payoff(mut self, payoff: Payoff) -> Self {
        self.payoff = payoff;
        self
    }

    /// Replace the step count.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Step length `expiry / steps`.
    pub fn time_step(&self) -> Time {
        self.expiry / self.steps as Real
    }

    /// Check every argument before any lattice is built.
    pub fn validate(&self) -> Result<()> {
        ensure_input!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive, got {}",
            self.spot
        );
        ensure_input!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive, got {}",
            self.strike
        );
        ensure_input!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure_input!(
            self.risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {}",
            self.risk_free_rate
        );
        ensure_input!(
            self.expiry.is_finite() && self.expiry > 0.0,
            "expiry must be positive, got {}",
            self.expiry
        );
        ensure_input!(self.steps >= 1, "step count must be >= 1, got {}", self.steps);
        Ok(())
    }
}

// ─── PricingResult ────────────────────────────────────────────────────────────

/// Outcome of a lattice pricing: the value together with every
/// intermediate needed to inspect or re-render the computation.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    /// Present value of the option, equal to `option_lattice.root()`.
    pub value: Price,
    /// Parameterisation used.
    pub model: LatticeModel,
    /// Derived step parameters.
    pub parameters: LatticeParameters,
    /// Underlying prices; `asset_lattice.root()` is the spot.
    pub asset_lattice: AssetLattice,
    /// Option values; row `N` holds the terminal payoffs.
    pub option_lattice: OptionLattice,
    /// The request that produced this result.
    pub request: PricingRequest,
}

// ─── Entry points ─────────────────────────────────────────────────────────────

/// Price `request` on a binomial lattice parameterised by `model`.
///
/// Input errors are reported before any lattice is built and domain errors
/// right after parameter derivation; no partial result is ever returned.
pub fn price(model: LatticeModel, request: &PricingRequest) -> Result<PricingResult> {
    run(model, request).map_err(|e| {
        warn!(%model, steps = request.steps, error = %e, "pricing request rejected");
        e
    })
}

/// Price with the linear parameterisation `u, d = 1 ± σ√Δt`.
pub fn price_linear(request: &PricingRequest) -> Result<PricingResult> {
    price(LatticeModel::Linear, request)
}

/// Price with the Cox-Ross-Rubinstein parameterisation.
pub fn price_cox_ross_rubinstein(request: &PricingRequest) -> Result<PricingResult> {
    price(LatticeModel::CoxRossRubinstein, request)
}

fn run(model: LatticeModel, request: &PricingRequest) -> Result<PricingResult> {
    request.validate()?;
    let parameters = model.derive(
        request.volatility,
        request.risk_free_rate,
        request.time_step(),
    )?;
    debug!(
        %model,
        up = parameters.up,
        down = parameters.down,
        p = parameters.up_probability,
        df = parameters.discount_factor,
        dt = parameters.time_step,
        "derived lattice parameters"
    );

    let asset_lattice = build_asset_lattice(
        request.spot,
        parameters.up,
        parameters.down,
        request.steps,
    )?;
    let option_lattice = collapse(
        &asset_lattice,
        &request.payoff,
        request.strike,
        parameters.up_probability,
        parameters.discount_factor,
        request.early_exercise,
    )?;
    let value = option_lattice.root();
    debug!(
        %model,
        steps = request.steps,
        early_exercise = request.early_exercise,
        payoff = request.payoff.name(),
        value,
        "priced option on lattice"
    );

    Ok(PricingResult {
        value,
        model,
        parameters,
        asset_lattice,
        option_lattice,
        request: request.clone(),
    })
}

// ─── LatticePricer ────────────────────────────────────────────────────────────

/// A pricer bound to a [`PricerConfig`].
///
/// Uses the configured model and rejects requests with more steps than
/// `max_steps` before doing any work.
#[derive(Debug, Clone, Default)]
pub struct LatticePricer {
    config: PricerConfig,
}

impl LatticePricer {
    /// Create a pricer after validating `config`.
    pub fn new(config: PricerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PricerConfig {
        &self.config
    }

    /// Price `request` with the configured model.
    pub fn price(&self, request: &PricingRequest) -> Result<PricingResult> {
        self.check_step_limit(request).map_err(|e| {
            warn!(steps = request.steps, max_steps = self.config.max_steps, "step limit exceeded");
            e
        })?;
        price(self.config.model, request)
    }

    fn check_step_limit(&self, request: &PricingRequest) -> Result<()> {
        ensure_input!(
            request.steps <= self.config.max_steps,
            "step count {} exceeds the configured maximum {}",
            request.steps,
            self.config.max_steps
        );
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
