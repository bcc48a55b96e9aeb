pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod harness;
pub mod eval;
pub mod config;
pub mod walkthrough;

// Convenience re-exports
pub use error::{Result, WalkthroughError};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{ModelConfig, Network, NetworkSpec};
pub use loss::error_metric::ErrorMetric;
pub use optim::sgd::Sgd;
pub use train::{train_loop, FitReport, TrainConfig};
pub use data::{Dataset, NoiseModel, ResponseGenerator, Sample, Sampler, Split};
pub use harness::{MlpRegressor, Regressor, TrainingOptions};
pub use eval::{compare, ErrorSummary, PredictionRecord, PredictionTable};
pub use config::WalkthroughConfig;
pub use walkthrough::{run, WalkthroughReport};
