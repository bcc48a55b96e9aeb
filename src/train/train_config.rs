use std::sync::mpsc;

use crate::loss::error_metric::ErrorMetric;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `max_epochs`  — hard cap on full passes over the training data
/// - `batch_size`  — samples per mini-batch; `None` uses the whole set
/// - `threshold`   — stop once every averaged gradient component of an epoch
///                   stays below this magnitude
/// - `error_metric`— which error function to minimise
/// - `log_every`   — emit a `debug!` line every this many epochs (0 = never)
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   keeps going without reporting.
pub struct TrainConfig {
    pub max_epochs: usize,
    pub batch_size: Option<usize>,
    pub threshold: f64,
    pub error_metric: ErrorMetric,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig`: full-batch, no progress channel.
    pub fn new(max_epochs: usize, threshold: f64, error_metric: ErrorMetric) -> Self {
        TrainConfig {
            max_epochs,
            batch_size: None,
            threshold,
            error_metric,
            log_every: 0,
            progress_tx: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}
