use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::error::{ensure_same_len, Result};

/// One evaluation row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub x: f64,
    pub actual: f64,
    pub predicted: f64,
}

impl PredictionRecord {
    /// actual − predicted
    pub fn residual(&self) -> f64 {
        self.actual - self.predicted
    }
}

/// Aggregate error statistics over a prediction table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub n: usize,
    pub sse: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub max_abs_error: f64,
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} sse={:.4} mse={:.4} rmse={:.4} mae={:.4} max|err|={:.4}",
            self.n, self.sse, self.mse, self.rmse, self.mae, self.max_abs_error
        )
    }
}

/// Actual vs. predicted outputs, aligned by index.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PredictionTable {
    rows: Vec<PredictionRecord>,
}

/// Pairs `inputs[i]`, `actual[i]` and `predicted[i]` into one row each.
pub fn compare(inputs: &[f64], actual: &[f64], predicted: &[f64]) -> Result<PredictionTable> {
    ensure_same_len(actual.len(), predicted.len())?;
    ensure_same_len(actual.len(), inputs.len())?;
    let rows = inputs.iter().zip(actual).zip(predicted)
        .map(|((&x, &actual), &predicted)| PredictionRecord { x, actual, predicted })
        .collect();
    Ok(PredictionTable { rows })
}

impl PredictionTable {
    pub fn rows(&self) -> &[PredictionRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All-zero statistics for an empty table.
    pub fn summary(&self) -> ErrorSummary {
        let n = self.rows.len();
        let sse: f64 = self.rows.iter().map(|r| r.residual().powi(2)).sum();
        let abs_sum: f64 = self.rows.iter().map(|r| r.residual().abs()).sum();
        let max_abs_error = self.rows.iter().fold(0.0_f64, |m, r| m.max(r.residual().abs()));
        let (mse, mae) = if n == 0 {
            (0.0, 0.0)
        } else {
            (sse / n as f64, abs_sum / n as f64)
        };
        ErrorSummary { n, sse, mse, rmse: mse.sqrt(), mae, max_abs_error }
    }

    /// Writes `x,actual,predicted,residual` rows with a header line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "x,actual,predicted,residual")?;
        for r in &self.rows {
            writeln!(writer, "{},{},{},{}", r.x, r.actual, r.predicted, r.residual())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for PredictionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>10} {:>10} {:>10}", "x", "actual", "predicted", "residual")?;
        for r in &self.rows {
            writeln!(
                f,
                "{:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                r.x, r.actual, r.predicted, r.residual()
            )?;
        }
        Ok(())
    }
}
