//! MergeService: orchestrates sources, applies merge policy, deserializes to DispatcherConfig.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::DispatcherConfig;
use config::ConfigError;
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults -> global file -> explicit file -> environment.
    pub fn load(explicit: Option<&Path>) -> Result<DispatcherConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
