use crate::data::dataset::Dataset;
use crate::error::{Result, WalkthroughError};

/// Training and evaluation halves of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub training: Dataset,
    pub evaluation: Dataset,
}

/// Puts the first `floor(fraction × N)` samples in `training` and the rest in
/// `evaluation`, keeping the original order.
pub fn split(dataset: &Dataset, fraction: f64) -> Result<Split> {
    if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
        return Err(WalkthroughError::InvalidFraction(fraction));
    }
    let cut = ((dataset.len() as f64) * fraction).floor() as usize;
    let (training, evaluation) = dataset.samples().split_at(cut.min(dataset.len()));
    Ok(Split {
        training: Dataset::new(training.to_vec()),
        evaluation: Dataset::new(evaluation.to_vec()),
    })
}
