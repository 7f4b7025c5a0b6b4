//! Configuration
//!
//! Layered with the `config` crate. Precedence, lowest to highest: built-in
//! defaults, global file, explicit `--config` file, `DISPATCHER__*` environment
//! variables. CLI flags are applied on top by the tooling layer.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod store;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use store::{StoreBackend, StoreConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
