//! Environment variable source: DISPATCHER__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `DISPATCHER__STORE__PATH=/srv/fleet` sets `store.path`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("DISPATCHER")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
