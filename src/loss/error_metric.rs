use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::activation::activation::ActivationFunction;
use crate::error::WalkthroughError;
use crate::loss::{ce::CeLoss, sse::SseLoss};

/// Selects the error function minimised during fitting.
///
/// - `Sse` — sum of squared errors; pairs with a linear output layer.
/// - `Ce`  — binary cross-entropy; pairs with a logistic output layer and
///   targets in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMetric {
    Sse,
    Ce,
}

impl ErrorMetric {
    pub fn loss(&self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            ErrorMetric::Sse => SseLoss::loss(predicted, expected),
            ErrorMetric::Ce => CeLoss::loss(predicted, expected),
        }
    }

    pub fn derivative(&self, predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        match self {
            ErrorMetric::Sse => SseLoss::derivative(predicted, expected),
            ErrorMetric::Ce => CeLoss::derivative(predicted, expected),
        }
    }

    /// Output-layer activation this metric expects.
    pub fn output_activation(&self) -> ActivationFunction {
        match self {
            ErrorMetric::Sse => ActivationFunction::Linear,
            ErrorMetric::Ce => ActivationFunction::Logistic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorMetric::Sse => "sse",
            ErrorMetric::Ce => "ce",
        }
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorMetric {
    type Err = WalkthroughError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sse" => Ok(ErrorMetric::Sse),
            "ce" => Ok(ErrorMetric::Ce),
            other => Err(WalkthroughError::InvalidConfig(format!(
                "unknown error metric '{other}'"
            ))),
        }
    }
}
