use std::fmt;

/// All errors that can occur while generating data, fitting or evaluating.
#[derive(Debug)]
pub enum WalkthroughError {
    /// A configuration literal is out of range.
    InvalidConfig(String),
    /// Distribution parameters rejected before sampling.
    InvalidDistribution { mean: f64, spread: f64 },
    /// Split fraction outside the open interval (0, 1).
    InvalidFraction(f64),
    /// An operation that needs at least one value received none.
    EmptyInput(&'static str),
    /// Two sequences that must be aligned have different lengths.
    LengthMismatch { expected: usize, actual: usize },
    /// NaN or infinite value found at `index` of `what`.
    NonFiniteValue { what: &'static str, index: usize },
    /// `predict` called on a regressor that has not been fitted.
    NotFitted,
    /// Training produced a NaN or infinite error, gradient or weight.
    Diverged { epoch: usize },
    /// Layer shapes that do not chain into a working network.
    InvalidNetwork(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for WalkthroughError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidDistribution { mean, spread } => {
                write!(f, "invalid normal distribution: mean {mean}, spread {spread}")
            }
            Self::InvalidFraction(v) => {
                write!(f, "split fraction must lie strictly between 0 and 1, got {v}")
            }
            Self::EmptyInput(what) => write!(f, "{what} must not be empty"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} values, got {actual}")
            }
            Self::NonFiniteValue { what, index } => {
                write!(f, "{what}[{index}] is not a finite number")
            }
            Self::NotFitted => write!(f, "model has not been fitted"),
            Self::Diverged { epoch } => {
                write!(f, "training diverged at epoch {epoch}: non-finite error or weights")
            }
            Self::InvalidNetwork(msg) => write!(f, "invalid network: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for WalkthroughError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WalkthroughError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for WalkthroughError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, WalkthroughError>;

/// Fails with `NonFiniteValue` on the first NaN or infinity in `values`.
pub(crate) fn ensure_finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(WalkthroughError::NonFiniteValue { what, index }),
        None => Ok(()),
    }
}

/// Fails with `LengthMismatch` unless both lengths agree.
pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(WalkthroughError::LengthMismatch { expected, actual });
    }
    Ok(())
}
