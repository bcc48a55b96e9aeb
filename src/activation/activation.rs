use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WalkthroughError;

/// Non-linearity applied inside a layer.
///
/// Names follow the usual regression-package vocabulary: `logistic`, `tanh`
/// and `linear` (no transformation, used on regression output layers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[serde(alias = "sigmoid")]
    Logistic,
    Tanh,
    #[serde(alias = "identity")]
    Linear,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative with respect to the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Linear => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Logistic => "logistic",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Linear => "linear",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = WalkthroughError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logistic" | "sigmoid" => Ok(ActivationFunction::Logistic),
            "tanh" => Ok(ActivationFunction::Tanh),
            "linear" | "identity" => Ok(ActivationFunction::Linear),
            other => Err(WalkthroughError::InvalidConfig(format!(
                "unknown activation function '{other}'"
            ))),
        }
    }
}
