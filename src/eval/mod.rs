pub mod prediction;

pub use prediction::{compare, ErrorSummary, PredictionRecord, PredictionTable};
