use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch cap for this run.
    pub max_epochs: usize,
    /// Error metric summed over all training samples at the end of the epoch.
    pub train_loss: f64,
    /// Largest absolute component of the full-training-set mean gradient at
    /// the end of the epoch. This is the value tested against the threshold.
    pub max_gradient: f64,
    pub elapsed_ms: u64,
}

/// Outcome of a completed fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub epochs: usize,
    pub final_loss: f64,
    /// `true` when the gradient threshold was reached before the epoch cap.
    pub converged: bool,
}
