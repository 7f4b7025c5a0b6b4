//! Built-in defaults that every load starts from.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store.backend", "sled")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")
}
