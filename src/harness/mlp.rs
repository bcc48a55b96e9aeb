use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{ensure_finite, Result, WalkthroughError};
use crate::harness::regressor::{validate_inputs, validate_training_data, Regressor};
use crate::loss::error_metric::ErrorMetric;
use crate::network::{ModelConfig, Network};
use crate::optim::sgd::Sgd;
use crate::train::{train_loop, FitReport, TrainConfig};

/// Gradient-descent settings shared by every model run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    pub learning_rate: f64,
    /// `None` trains on the whole set at once.
    pub batch_size: Option<usize>,
    pub threshold: f64,
    pub max_epochs: usize,
    pub log_every: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            learning_rate: 0.05,
            batch_size: Some(10),
            threshold: 0.01,
            max_epochs: 2_000,
            log_every: 500,
        }
    }
}

/// Single-hidden-layer network regressor, `1 → hidden_units → 1`.
#[derive(Debug, Clone)]
pub struct MlpRegressor {
    model: ModelConfig,
    options: TrainingOptions,
    network: Option<Network>,
}

impl MlpRegressor {
    pub fn new(model: ModelConfig, options: TrainingOptions) -> MlpRegressor {
        MlpRegressor { model, options, network: None }
    }

    /// Wraps an already trained network, e.g. one restored with `Network::load_json`.
    ///
    /// # Errors
    /// `InvalidNetwork` unless the layers chain from one input to one output.
    pub fn from_network(model: ModelConfig, options: TrainingOptions, network: Network) -> Result<MlpRegressor> {
        network.check_shapes()?;
        if network.input_size() != 1 || network.output_size() != 1 {
            return Err(WalkthroughError::InvalidNetwork(format!(
                "expected 1 input and 1 output, got {} and {}",
                network.input_size(),
                network.output_size()
            )));
        }
        Ok(MlpRegressor { model, options, network: Some(network) })
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }
}

impl Regressor for MlpRegressor {
    fn fit(&mut self, inputs: &[f64], targets: &[f64]) -> Result<FitReport> {
        validate_training_data(inputs, targets)?;
        if self.model.error_metric == ErrorMetric::Ce
            && targets.iter().any(|t| !(0.0..=1.0).contains(t))
        {
            return Err(WalkthroughError::InvalidConfig(
                "error metric 'ce' needs targets within [0, 1]".into(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.model.seed);
        let mut network = Network::new(&self.model.network_spec(), &mut rng);

        let mut config = TrainConfig::new(
            self.options.max_epochs,
            self.options.threshold,
            self.model.error_metric,
        )
        .with_log_every(self.options.log_every);
        if let Some(batch_size) = self.options.batch_size {
            config = config.with_batch_size(batch_size);
        }

        let rows: Vec<Vec<f64>> = inputs.iter().map(|&x| vec![x]).collect();
        let labels: Vec<Vec<f64>> = targets.iter().map(|&y| vec![y]).collect();
        let optimizer = Sgd::new(self.options.learning_rate);
        let report = train_loop(&mut network, &rows, &labels, &optimizer, &config, &mut rng)?;

        info!(
            "fitted {} in {} epochs: error = {:.6}{}",
            self.describe(),
            report.epochs,
            report.final_loss,
            if report.converged { "" } else { " (epoch cap)" }
        );
        self.network = Some(network);
        Ok(report)
    }

    fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        let network = self.network.as_ref().ok_or(WalkthroughError::NotFitted)?;
        validate_inputs(inputs)?;
        let predictions = inputs.iter()
            .map(|&x| {
                network.predict(vec![x]).first().copied()
                    .ok_or_else(|| WalkthroughError::InvalidNetwork("network produced no output".into()))
            })
            .collect::<Result<Vec<f64>>>()?;
        ensure_finite("predictions", &predictions)?;
        Ok(predictions)
    }

    fn describe(&self) -> String {
        self.model.label()
    }
}
