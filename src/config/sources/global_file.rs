//! Global config file: $XDG_CONFIG_HOME/dispatcher/config.toml (optional)

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = xdg::global_config_file() else {
        return Ok(builder);
    };
    Ok(builder.add_source(File::from(path).required(false)))
}
