use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::loss::error_metric::ErrorMetric;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// A serializable description of a network architecture plus the error
/// metric it is trained against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    pub error_metric: ErrorMetric,
}

impl NetworkSpec {
    /// `1 → hidden_units → 1` regression network. The output activation is
    /// the one `error_metric` pairs with.
    pub fn single_hidden(
        name: impl Into<String>,
        hidden_units: usize,
        activation: ActivationFunction,
        error_metric: ErrorMetric,
    ) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            layers: vec![
                LayerSpec { size: hidden_units, input_size: 1, activation },
                LayerSpec {
                    size: 1,
                    input_size: hidden_units,
                    activation: error_metric.output_activation(),
                },
            ],
            error_metric,
        }
    }
}

/// Hyperparameters of one model run. Purely descriptive: the harness turns
/// it into a `NetworkSpec` and a seeded rng.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub hidden_units: usize,
    pub activation: ActivationFunction,
    pub error_metric: ErrorMetric,
    pub seed: u64,
}

impl ModelConfig {
    pub fn label(&self) -> String {
        format!("{}h-{}-{}", self.hidden_units, self.activation, self.error_metric)
    }

    pub fn network_spec(&self) -> NetworkSpec {
        NetworkSpec::single_hidden(self.label(), self.hidden_units, self.activation, self.error_metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sse_model_gets_linear_output() {
        let cfg = ModelConfig {
            hidden_units: 5,
            activation: ActivationFunction::Tanh,
            error_metric: ErrorMetric::Sse,
            seed: 1,
        };
        let spec = cfg.network_spec();
        assert_eq!(spec.name, "5h-tanh-sse");
        assert_eq!(spec.layers.len(), 2);
        assert_eq!(spec.layers[0].input_size, 1);
        assert_eq!(spec.layers[0].size, 5);
        assert_eq!(spec.layers[1].input_size, 5);
        assert_eq!(spec.layers[1].activation, ActivationFunction::Linear);
    }

    #[test]
    fn model_config_reads_from_names() {
        let cfg: ModelConfig = serde_json::from_str(
            r#"{"hidden_units": 3, "activation": "logistic", "error_metric": "sse", "seed": 7}"#,
        ).unwrap();
        assert_eq!(cfg.activation, ActivationFunction::Logistic);
        assert_eq!(cfg.error_metric, ErrorMetric::Sse);
    }
}
