//! CLI Tooling
//!
//! Command-line interface for inspecting node resources and administering
//! reservations. Every command goes through [`ReservationAdmin`], so the CLI
//! never touches the metadata tree directly.

use crate::admin::{ReservationAdmin, ReserveRequest};
use crate::config::{ConfigLoader, DispatcherConfig, StoreBackend};
use crate::error::ApiError;
use crate::filter::AvailabilityFilter;
use crate::fleet::{Fleet, Node};
use crate::logging::LoggingOverrides;
use crate::resource::StashType;
use crate::store::{FleetStore, MemoryFleetStore, SledFleetStore};
use crate::tooling::format::{
    format_release_text, format_resource_detail_text, format_resources_text, resource_json,
    stash_json,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Dispatcher CLI - external resource reservations across a worker fleet
#[derive(Parser)]
#[command(name = "dispatcher")]
#[command(about = "Inspect external resources on fleet nodes and administer their reservations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fleet store directory (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List node names
    Nodes,
    /// List the resources of a node
    Resources {
        node: String,
        /// Only resources that are enabled and unreserved
        #[arg(long)]
        available: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one resource
    Show {
        node: String,
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Force-release a reservation without checking its key
    Release { node: String, id: String },
    /// Reserve a resource
    Reserve {
        node: String,
        id: String,
        /// Build, job or person holding the resource
        #[arg(long)]
        holder: String,
        /// When the lease should lapse (free-form label)
        #[arg(long)]
        expires: String,
        /// Record the reservation as made by a third party
        #[arg(long)]
        external: bool,
        /// Release key; derived when omitted
        #[arg(long)]
        key: Option<String>,
    },
    /// Release a reservation as its holder
    Unreserve {
        node: String,
        id: String,
        #[arg(long)]
        key: String,
    },
    /// Enable a resource
    Enable { node: String, id: String },
    /// Disable a resource
    Disable { node: String, id: String },
    /// Load node definitions from a JSON or TOML file
    Import { file: PathBuf },
}

impl Cli {
    /// Load configuration and apply the `--store` override
    pub fn load_config(&self) -> Result<DispatcherConfig, ApiError> {
        let loaded = match &self.config {
            Some(path) => ConfigLoader::load_with_file(path),
            None => ConfigLoader::load(),
        };
        let mut config = loaded.map_err(|e| ApiError::ConfigError(e.to_string()))?;

        if let Some(store) = &self.store {
            config.store.path = Some(store.clone());
        }
        Ok(config)
    }

    /// Logging flags, applied above environment and configuration
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

/// Node definitions accepted by `import`
#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    nodes: Vec<Node>,
}

/// CLI context for executing commands
pub struct CliContext {
    admin: ReservationAdmin,
}

impl CliContext {
    /// Open the configured store and load the fleet
    pub fn new(config: &DispatcherConfig) -> Result<Self, ApiError> {
        let store: Arc<dyn FleetStore> = match config.store.backend {
            StoreBackend::Sled => Arc::new(SledFleetStore::open(&config.store.resolve_path()?)?),
            StoreBackend::Memory => Arc::new(MemoryFleetStore::new()),
        };
        let fleet = Arc::new(Fleet::open(store)?);
        Ok(Self::with_fleet(fleet))
    }

    /// Context over an already-open fleet
    pub fn with_fleet(fleet: Arc<Fleet>) -> Self {
        Self {
            admin: ReservationAdmin::new(fleet, AvailabilityFilter::new()),
        }
    }

    pub fn admin(&self) -> &ReservationAdmin {
        &self.admin
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Nodes => Ok(self.admin.fleet().node_names().join("\n")),
            Commands::Resources {
                node,
                available,
                format,
            } => {
                let resources = self.admin.list_resources(node, *available)?;
                if is_json(format)? {
                    let items: Vec<_> = resources.iter().map(resource_json).collect();
                    to_pretty(&json!({ "node": node, "resources": items }))
                } else {
                    Ok(format_resources_text(node, &resources))
                }
            }
            Commands::Show { node, id, format } => {
                let resource = self.admin.find_resource(node, id)?;
                if is_json(format)? {
                    let mut value = resource_json(&resource);
                    value["node"] = json!(node);
                    to_pretty(&value)
                } else {
                    Ok(format_resource_detail_text(node, &resource))
                }
            }
            Commands::Release { node, id } => {
                let outcome = self.admin.force_release(node, id)?;
                Ok(format_release_text(&outcome))
            }
            Commands::Reserve {
                node,
                id,
                holder,
                expires,
                external,
                key,
            } => {
                let stash_type = if *external {
                    StashType::External
                } else {
                    StashType::Internal
                };
                let stash = self.admin.reserve(
                    node,
                    id,
                    ReserveRequest {
                        stash_type,
                        holder_id: holder.clone(),
                        expires: expires.clone(),
                        key: key.clone(),
                    },
                )?;
                to_pretty(&stash_json(&stash))
            }
            Commands::Unreserve { node, id, key } => {
                let outcome = self.admin.release(node, id, key)?;
                Ok(format_release_text(&outcome))
            }
            Commands::Enable { node, id } => {
                self.admin.set_enabled(node, id, true)?;
                Ok(format!("Enabled {} on {}.", id, node))
            }
            Commands::Disable { node, id } => {
                self.admin.set_enabled(node, id, false)?;
                Ok(format!("Disabled {} on {}.", id, node))
            }
            Commands::Import { file } => self.import(file),
        }
    }

    fn import(&self, file: &Path) -> Result<String, ApiError> {
        let content = std::fs::read_to_string(file).map_err(|e| {
            ApiError::InvalidArgument(format!("Failed to read {}: {}", file.display(), e))
        })?;
        let parsed: FleetFile = if file.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|e| {
                ApiError::InvalidArgument(format!("Invalid fleet file {}: {}", file.display(), e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                ApiError::InvalidArgument(format!("Invalid fleet file {}: {}", file.display(), e))
            })?
        };

        let fleet = self.admin.fleet();
        let count = parsed.nodes.len();
        for node in parsed.nodes {
            fleet.insert_node(node);
        }
        fleet.save()?;
        info!(file = %file.display(), nodes = count, "fleet imported");
        Ok(format!("Imported {} node(s).", count))
    }
}

fn is_json(format: &str) -> Result<bool, ApiError> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        other => Err(ApiError::InvalidArgument(format!(
            "Unknown format {} (expected text or json)",
            other
        ))),
    }
}

fn to_pretty(value: &serde_json::Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Storage(crate::error::StorageError::Serialization(e)))
}
