use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::data::response::NoiseModel;
use crate::error::{Result, WalkthroughError};
use crate::harness::mlp::TrainingOptions;
use crate::loss::error_metric::ErrorMetric;
use crate::network::spec::ModelConfig;

/// Every literal of one walkthrough run.
///
/// Missing JSON fields fall back to `Default`, which reproduces the standard
/// run: 251 samples from N(0, 2), targets around `cos(x) + x` with noise 0.15,
/// an 80/20 split and three networks (3, 5, 7 hidden units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    pub sample_count: usize,
    pub mean: f64,
    pub spread: f64,
    pub noise: NoiseModel,
    pub split_fraction: f64,
    /// Seeds the sampler and response generator.
    pub data_seed: u64,
    pub models: Vec<ModelConfig>,
    pub training: TrainingOptions,
    /// When set, CSV tables and trained networks are written here.
    pub output_dir: Option<PathBuf>,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        let run = |hidden_units, activation, seed| ModelConfig {
            hidden_units,
            activation,
            error_metric: ErrorMetric::Sse,
            seed,
        };
        WalkthroughConfig {
            sample_count: 251,
            mean: 0.0,
            spread: 2.0,
            noise: NoiseModel::Constant { spread: 0.15 },
            split_fraction: 0.8,
            data_seed: 1,
            models: vec![
                run(3, ActivationFunction::Logistic, 1),
                run(5, ActivationFunction::Logistic, 2),
                run(7, ActivationFunction::Tanh, 3),
            ],
            training: TrainingOptions::default(),
            output_dir: None,
        }
    }
}

impl WalkthroughConfig {
    /// Reads a JSON config and validates it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<WalkthroughConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: WalkthroughConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(WalkthroughError::InvalidConfig(msg)) };

        if self.sample_count == 0 {
            return invalid("sample_count must be positive".into());
        }
        if !self.mean.is_finite() || !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(WalkthroughError::InvalidDistribution { mean: self.mean, spread: self.spread });
        }
        self.noise.validate()?;
        if !self.split_fraction.is_finite() || self.split_fraction <= 0.0 || self.split_fraction >= 1.0 {
            return Err(WalkthroughError::InvalidFraction(self.split_fraction));
        }
        if self.models.is_empty() {
            return invalid("at least one model run is required".into());
        }
        if let Some(m) = self.models.iter().find(|m| m.hidden_units == 0) {
            return invalid(format!("model {} has no hidden units", m.label()));
        }

        let t = &self.training;
        if !t.learning_rate.is_finite() || t.learning_rate <= 0.0 {
            return invalid(format!("learning_rate must be positive, got {}", t.learning_rate));
        }
        if t.threshold.is_nan() || t.threshold <= 0.0 {
            return invalid(format!("threshold must be positive, got {}", t.threshold));
        }
        if t.max_epochs == 0 {
            return invalid("max_epochs must be positive".into());
        }
        if t.batch_size == Some(0) {
            return invalid("batch_size must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WalkthroughConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sample_count, 251);
        let hidden: Vec<usize> = config.models.iter().map(|m| m.hidden_units).collect();
        assert_eq!(hidden, vec![3, 5, 7]);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: WalkthroughConfig =
            serde_json::from_str(r#"{"sample_count": 100, "noise": {"kind": "constant", "spread": 0.3}}"#).unwrap();
        assert_eq!(config.sample_count, 100);
        assert_eq!(config.noise, NoiseModel::Constant { spread: 0.3 });
        assert_eq!(config.split_fraction, 0.8);
        assert_eq!(config.models.len(), 3);
        assert_eq!(config.training, TrainingOptions::default());
    }

    #[test]
    fn rejects_bad_literals() {
        let bad = [
            WalkthroughConfig { sample_count: 0, ..Default::default() },
            WalkthroughConfig { spread: 0.0, ..Default::default() },
            WalkthroughConfig { split_fraction: 1.0, ..Default::default() },
            WalkthroughConfig { models: vec![], ..Default::default() },
            WalkthroughConfig { noise: NoiseModel::Constant { spread: -0.1 }, ..Default::default() },
        ];
        for config in &bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
        let mut config = WalkthroughConfig::default();
        config.training.learning_rate = 0.0;
        assert!(config.validate().is_err());
    }
}
