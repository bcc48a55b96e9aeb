use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Result, WalkthroughError};
use crate::math::matrix::Matrix;
use crate::layers::dense::Layer;
use crate::network::spec::NetworkSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from a spec, drawing initial weights from `rng`.
    pub fn new<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Network {
        let layers = spec.layers.iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation, &mut *rng))
            .collect();
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.weights.rows).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// `true` while every weight and bias is a finite number.
    pub fn is_finite(&self) -> bool {
        self.layers.iter().all(|l| l.weights.is_finite() && l.biases.is_finite())
    }

    /// Checks that the layers chain: each weight matrix is
    /// `previous size × size`, each bias row is `1 × size`, and every stored
    /// row has the declared width.
    pub fn check_shapes(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(WalkthroughError::InvalidNetwork("no layers".into()));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            let bad = |msg: String| -> Result<()> {
                Err(WalkthroughError::InvalidNetwork(format!("layer {i}: {msg}")))
            };
            if layer.size == 0 {
                return bad("size is zero".into());
            }
            if !is_rectangular(&layer.weights) || !is_rectangular(&layer.biases) {
                return bad("stored data does not match declared dimensions".into());
            }
            if layer.weights.cols != layer.size {
                return bad(format!("weights have {} columns for {} units", layer.weights.cols, layer.size));
            }
            if layer.biases.rows != 1 || layer.biases.cols != layer.size {
                return bad(format!(
                    "biases are {}x{}, expected 1x{}",
                    layer.biases.rows, layer.biases.cols, layer.size
                ));
            }
            if i > 0 && layer.weights.rows != self.layers[i - 1].size {
                return bad(format!(
                    "weights take {} inputs but the previous layer has {} units",
                    layer.weights.rows,
                    self.layers[i - 1].size
                ));
            }
        }
        Ok(())
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Inference-only forward pass.
    pub fn predict(&self, input: Vec<f64>) -> Vec<f64> {
        self.layers.iter().fold(input, |current, layer| layer.predict(current))
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    /// Layer shapes are checked before the network is returned.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.check_shapes()?;
        Ok(network)
    }
}

fn is_rectangular(m: &Matrix) -> bool {
    m.data.len() == m.rows && m.data.iter().all(|row| row.len() == m.cols)
}
