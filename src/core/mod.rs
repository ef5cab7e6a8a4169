pub mod engine;
pub mod pauli;
pub mod pipeline;
pub mod render;
pub mod update;

pub use crate::domain::model::{FusionJob, UpdateReport};
pub use crate::domain::ports::{ConfigProvider, FusionPipeline, Storage};
pub use crate::utils::error::Result;
