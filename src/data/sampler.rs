use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, WalkthroughError};

/// Draws iid values from `Normal(mean, spread)`.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    normal: Normal<f64>,
}

impl Sampler {
    /// Fails unless `spread > 0` and both parameters are finite.
    pub fn new(mean: f64, spread: f64) -> Result<Sampler> {
        let normal = normal(mean, spread)?;
        Ok(Sampler { normal })
    }

    pub fn mean(&self) -> f64 {
        self.normal.mean()
    }

    pub fn spread(&self) -> f64 {
        self.normal.std_dev()
    }

    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.normal.sample(&mut *rng)).collect()
    }
}

/// Validated normal distribution; `spread` must be strictly positive.
pub(crate) fn normal(mean: f64, spread: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() || !spread.is_finite() || spread <= 0.0 {
        return Err(WalkthroughError::InvalidDistribution { mean, spread });
    }
    Normal::new(mean, spread).map_err(|_| WalkthroughError::InvalidDistribution { mean, spread })
}
