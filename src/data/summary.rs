use std::fmt;

use serde::Serialize;

use crate::error::{ensure_same_len, Result, WalkthroughError};

/// Five-number summary plus mean and sample standard deviation of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
    pub sd: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Result<Summary> {
        if values.is_empty() {
            return Err(WalkthroughError::EmptyInput("summary values"));
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let sd = if n > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Ok(Summary {
            n,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            mean,
            q3: quantile(&sorted, 0.75),
            max: sorted[n - 1],
            sd,
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} min={:.3} q1={:.3} median={:.3} mean={:.3} q3={:.3} max={:.3} sd={:.3}",
            self.n, self.min, self.q1, self.median, self.mean, self.q3, self.max, self.sd
        )
    }
}

/// Quantile of sorted data, interpolating linearly between order statistics.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Pearson correlation coefficient; 0 when either column is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    ensure_same_len(xs.len(), ys.len())?;
    if xs.is_empty() {
        return Err(WalkthroughError::EmptyInput("correlation columns"));
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return Ok(0.0);
    }
    Ok(sxy / (sxx * syy).sqrt())
}
