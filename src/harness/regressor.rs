use crate::error::{ensure_finite, ensure_same_len, Result, WalkthroughError};
use crate::train::epoch_stats::FitReport;

/// Fit/predict seam between the walkthrough and a numeric back-end.
///
/// Implementations only ever see plain, finite, equally long sequences; the
/// free functions below perform those checks.
pub trait Regressor {
    fn fit(&mut self, inputs: &[f64], targets: &[f64]) -> Result<FitReport>;

    fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>>;

    /// Short human-readable identifier used in logs and tables.
    fn describe(&self) -> String;
}

pub fn validate_inputs(inputs: &[f64]) -> Result<()> {
    ensure_finite("inputs", inputs)
}

pub fn validate_training_data(inputs: &[f64], targets: &[f64]) -> Result<()> {
    if inputs.is_empty() {
        return Err(WalkthroughError::EmptyInput("training inputs"));
    }
    ensure_same_len(inputs.len(), targets.len())?;
    ensure_finite("inputs", inputs)?;
    ensure_finite("targets", targets)
}
