pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::CalculatorSession;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::engine::{FusionEngine, RunOutcome};
pub use crate::core::pauli::{anticommutes, multiply, pretty, Pauli, PauliString, Sign, Stabilizer};
pub use crate::core::pipeline::StandardPipeline;
pub use crate::core::update::{update_resource_with_fusions, Outcomes, UpdateAction, UpdateResult};
pub use crate::utils::error::{FusionError, Result};
