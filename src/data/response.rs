use rand::Rng;
use rand_distr::Distribution;
use serde::{Serialize, Deserialize};

use crate::data::dataset::{Dataset, Sample};
use crate::data::sampler::normal;
use crate::error::{Result, WalkthroughError};

/// The link function of the walkthrough: `cos(x) + x`.
pub fn cosine_plus_identity(x: f64) -> f64 {
    x.cos() + x
}

/// Standard deviation of the noise added around the link function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseModel {
    /// Same spread for every input.
    Constant { spread: f64 },
    /// Spread grows with the input magnitude: `base + per_unit · |x|`.
    ScaledByInput { base: f64, per_unit: f64 },
}

impl NoiseModel {
    pub fn spread_at(&self, x: f64) -> f64 {
        match *self {
            NoiseModel::Constant { spread } => spread,
            NoiseModel::ScaledByInput { base, per_unit } => base + per_unit * x.abs(),
        }
    }

    /// Fails with `InvalidConfig` naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str, value: f64, rule: &str| -> Result<()> {
            Err(WalkthroughError::InvalidConfig(format!("noise {field} must be {rule}, got {value}")))
        };
        match *self {
            NoiseModel::Constant { spread } if !(spread.is_finite() && spread > 0.0) => {
                invalid("spread", spread, "finite and positive")
            }
            NoiseModel::ScaledByInput { base, .. } if !(base.is_finite() && base > 0.0) => {
                invalid("base", base, "finite and positive")
            }
            NoiseModel::ScaledByInput { per_unit, .. } if !(per_unit.is_finite() && per_unit >= 0.0) => {
                invalid("per_unit", per_unit, "finite and non-negative")
            }
            _ => Ok(()),
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel::Constant { spread: 0.15 }
    }
}

/// Produces noisy targets `y ~ Normal(link(x), noise(x))`.
#[derive(Debug, Clone, Copy)]
pub struct ResponseGenerator {
    link: fn(f64) -> f64,
    noise: NoiseModel,
}

impl ResponseGenerator {
    pub fn new(link: fn(f64) -> f64, noise: NoiseModel) -> Result<ResponseGenerator> {
        noise.validate()?;
        Ok(ResponseGenerator { link, noise })
    }

    pub fn link(&self, x: f64) -> f64 {
        (self.link)(x)
    }

    pub fn noise(&self) -> NoiseModel {
        self.noise
    }

    /// One target per input, in input order.
    pub fn generate<R: Rng + ?Sized>(&self, inputs: &[f64], rng: &mut R) -> Result<Vec<f64>> {
        inputs.iter()
            .map(|&x| -> Result<f64> {
                Ok(normal(self.link(x), self.noise.spread_at(x))?.sample(&mut *rng))
            })
            .collect()
    }

    pub fn build_dataset<R: Rng + ?Sized>(&self, inputs: &[f64], rng: &mut R) -> Result<Dataset> {
        let targets = self.generate(inputs, rng)?;
        Ok(inputs.iter().zip(targets)
            .map(|(&x, y)| Sample { x, y })
            .collect::<Vec<_>>()
            .into())
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        ResponseGenerator { link: cosine_plus_identity, noise: NoiseModel::default() }
    }
}
