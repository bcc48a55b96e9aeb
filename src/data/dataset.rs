use std::io::Write;

use serde::{Serialize, Deserialize};

use crate::error::{ensure_same_len, Result};
use crate::data::split::{split, Split};

/// One (x, y) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Ordered, immutable sequence of samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Dataset {
        Dataset { samples }
    }

    /// Pairs `xs[i]` with `ys[i]`.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Dataset> {
        ensure_same_len(xs.len(), ys.len())?;
        Ok(Dataset {
            samples: xs.iter().zip(ys.iter()).map(|(&x, &y)| Sample { x, y }).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// Order-preserving train/evaluation partition; see [`split`].
    pub fn split(&self, fraction: f64) -> Result<Split> {
        split(self, fraction)
    }

    /// Writes `x,y` rows with a header line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "x,y")?;
        for s in &self.samples {
            writeln!(writer, "{},{}", s.x, s.y)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Dataset::new(samples)
    }
}
