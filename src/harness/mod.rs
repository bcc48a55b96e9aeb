pub mod regressor;
pub mod mlp;

pub use regressor::{validate_inputs, validate_training_data, Regressor};
pub use mlp::{MlpRegressor, TrainingOptions};
