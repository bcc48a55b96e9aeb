pub mod dataset;
pub mod sampler;
pub mod response;
pub mod split;
pub mod summary;

pub use dataset::{Dataset, Sample};
pub use sampler::Sampler;
pub use response::{cosine_plus_identity, NoiseModel, ResponseGenerator};
pub use split::{split, Split};
pub use summary::{pearson, Summary};
