//! Exercise payoffs evaluated at lattice nodes.
//!
//! A [`Payoff`] maps an asset price and a strike to the value received on
//! exercise.  Vanilla calls and puts are built in; anything else can be
//! injected as a [`Payoff::Custom`] function without touching the
//! backward induction.

use std::fmt;
use std::sync::Arc;

use bt_core::Real;
use serde::{Serialize, Serializer};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Signature of an injected payoff: `(asset_price, strike) -> value`.
pub type PayoffFn = Arc<dyn Fn(Real, Real) -> Real + Send + Sync>;

/// Exercise payoff of an option.
///
/// Values must be finite and non-negative; the lattice rejects anything
/// else with a numeric-domain error.
#[derive(Clone, Default)]
pub enum Payoff {
    /// `max(S − K, 0)`.
    #[default]
    Call,
    /// `max(K − S, 0)`.
    Put,
    /// A user-supplied payoff function.
    Custom {
        /// Label used in logs and serialised results.
        name: String,
        /// The payoff function.
        function: PayoffFn,
    },
}

impl Payoff {
    /// Plain vanilla payoff of the given type.
    pub fn vanilla(option_type: OptionType) -> Self {
        match option_type {
            OptionType::Call => Payoff::Call,
            OptionType::Put => Payoff::Put,
        }
    }

    /// Wrap a closure as a named custom payoff.
    ///
    /// ```
    /// use bt_methods::lattice::Payoff;
    /// let digital = Payoff::custom("digital call", |s, k| if s > k { 1.0 } else { 0.0 });
    /// assert_eq!(digital.value(105.0, 100.0), 1.0);
    /// ```
    pub fn custom<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Real, Real) -> Real + Send + Sync + 'static,
    {
        Payoff::Custom {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// Value received when exercising at asset price `price`.
    #[inline]
    pub fn value(&self, price: Real, strike: Real) -> Real {
        match self {
            Payoff::Call => (price - strike).max(0.0),
            Payoff::Put => (strike - price).max(0.0),
            Payoff::Custom { function, .. } => function(price, strike),
        }
    }

    /// The vanilla option type, or `None` for a custom payoff.
    pub fn option_type(&self) -> Option<OptionType> {
        match self {
            Payoff::Call => Some(OptionType::Call),
            Payoff::Put => Some(OptionType::Put),
            Payoff::Custom { .. } => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        match self {
            Payoff::Call => "call",
            Payoff::Put => "put",
            Payoff::Custom { name, .. } => name,
        }
    }
}

impl fmt::Debug for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payoff::Call => f.write_str("Call"),
            Payoff::Put => f.write_str("Put"),
            Payoff::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

impl Serialize for Payoff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
