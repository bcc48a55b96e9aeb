pub mod sse;
pub mod ce;
pub mod error_metric;

pub use sse::SseLoss;
pub use ce::CeLoss;
pub use error_metric::ErrorMetric;
