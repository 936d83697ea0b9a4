//! Activation functions.
//!
//! Every function is evaluated at the pre-activation value `x`; `derivative(x)`
//! is `d/dx activate(x)` at that same `x`, not at the output.

use neuronet_data::ActivationKind;
use std::fmt;
use std::sync::Arc;

/// A bounded activation function paired with its derivative.
pub trait ActivationFunction: fmt::Debug + Send + Sync {
    fn activate(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;

    /// Upper bound of `|activate(x)|` over all finite `x`.
    fn bound(&self) -> f64;
}

/// Activation shared between neurons.
pub type SharedActivation = Arc<dyn ActivationFunction>;

impl ActivationFunction for ActivationKind {
    fn activate(&self, x: f64) -> f64 {
        match self {
            ActivationKind::Tanh => x.tanh(),
            ActivationKind::Sigmoid => logistic(x),
            ActivationKind::Softsign => x / (1.0 + x.abs()),
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationKind::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationKind::Sigmoid => {
                let s = logistic(x);
                s * (1.0 - s)
            }
            ActivationKind::Softsign => {
                let d = 1.0 + x.abs();
                1.0 / (d * d)
            }
        }
    }

    fn bound(&self) -> f64 {
        1.0
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Shared handle to a built-in activation.
#[must_use]
pub fn shared(kind: ActivationKind) -> SharedActivation {
    Arc::new(kind)
}

/// The default activation, hyperbolic tangent.
#[must_use]
pub fn default_activation() -> SharedActivation {
    shared(ActivationKind::Tanh)
}
