//! CLI Tooling
//!
//! Command-line interface for taxonomy operations: forward resolution,
//! reverse reconstruction, flat-value derivation, and forest auditing.
//! `CliContext::execute` returns the rendered output so commands are
//! testable without spawning a process.

use crate::config::{ConfigLoader, TaxaConfig};
use crate::error::{ApiError, ResolveError};
use crate::resolver::selection::derive_flat_value;
use crate::resolver::{reconstruct_selection, resolve_context, FlatValue};
use crate::taxonomy::definition::{default_forest, load_definition};
use crate::taxonomy::store::TaxonomyStore;
use crate::tooling::format::{
    format_chain_text, format_context_text, format_flat_value_text, format_tree_text,
    format_validate_text,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Taxa CLI - category taxonomy resolver
#[derive(Parser)]
#[command(name = "taxa")]
#[command(about = "Immutable category taxonomy store and resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an identifier (id or display name) to breadcrumb, parent
    /// and siblings
    Resolve {
        /// Category id or display name
        identifier: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Reconstruct the per-level selection chain for a persisted flat value
    Reconstruct {
        /// The flat category value stored on a product record
        flat_value: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Derive the persistable flat value for a selection chain
    Derive {
        /// Chosen node ids, root first
        #[arg(required = true)]
        chain: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate the forest and report the duplicate-display-name audit
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Render the whole forest
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI execution context: the loaded configuration and the store built from
/// it. Building the store is the fail-fast point for malformed definitions.
pub struct CliContext {
    config: TaxaConfig,
    store: TaxonomyStore,
}

impl CliContext {
    /// Create a new CLI context, loading the configured taxonomy definition
    /// (or the built-in retail forest).
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)
        } else {
            ConfigLoader::load()
        }
        .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Self::from_config(config)
    }

    /// Create a CLI context from an already-loaded configuration (used by
    /// the binary, which initializes logging in between).
    pub fn from_config(config: TaxaConfig) -> Result<Self, ApiError> {
        let forest = match &config.taxonomy.definition {
            Some(path) => {
                info!(path = %path.display(), "loading taxonomy definition");
                load_definition(path)?
            }
            None => default_forest(),
        };
        let store = TaxonomyStore::from_forest(&forest)?;
        Ok(Self { config, store })
    }

    /// Build a context over an already-constructed store (tests, embedding).
    pub fn with_store(store: TaxonomyStore) -> Self {
        Self {
            config: TaxaConfig::default(),
            store,
        }
    }

    pub fn config(&self) -> &TaxaConfig {
        &self.config
    }

    pub fn store(&self) -> &TaxonomyStore {
        &self.store
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Resolve { identifier, format } => self.execute_resolve(identifier, format),
            Commands::Reconstruct { flat_value, format } => {
                self.execute_reconstruct(flat_value, format)
            }
            Commands::Derive { chain, format } => self.execute_derive(chain, format),
            Commands::Validate { format } => self.execute_validate(format),
            Commands::Tree { format } => self.execute_tree(format),
        }
    }

    fn execute_resolve(&self, identifier: &str, format: &str) -> Result<String, ApiError> {
        // A miss is an expected outcome (stale URL); it is reported in the
        // output, not as a command failure.
        match resolve_context(&self.store, identifier) {
            Ok(ctx) => {
                if format == "json" {
                    let output = json!({
                        "identifier": identifier,
                        "found": true,
                        "node": ctx.node,
                        "is_leaf": ctx.is_leaf,
                        "breadcrumb": ctx.breadcrumb,
                        "parent": ctx.parent,
                        "siblings": ctx.siblings,
                    });
                    Ok(serde_json::to_string_pretty(&output)
                        .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    Ok(format_context_text(&ctx))
                }
            }
            Err(ResolveError::NotFound(_)) => {
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&json!({
                        "identifier": identifier,
                        "found": false,
                    }))
                    .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    Ok(format!("Not found: {}\n", identifier))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn execute_reconstruct(&self, flat_value: &str, format: &str) -> Result<String, ApiError> {
        match reconstruct_selection(&self.store, &FlatValue::from_raw(flat_value)) {
            Ok(chain) => {
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&json!({
                        "flat_value": flat_value,
                        "found": true,
                        "chain": chain,
                        "depth": chain.len(),
                    }))
                    .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    Ok(format_chain_text(&self.store, &chain))
                }
            }
            Err(ResolveError::NotFound(_)) => {
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&json!({
                        "flat_value": flat_value,
                        "found": false,
                    }))
                    .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    Ok(format!("Not found: {} (no category selected)\n", flat_value))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn execute_derive(&self, chain: &[String], format: &str) -> Result<String, ApiError> {
        let value = derive_flat_value(&self.store, &chain.to_vec())?;
        if format == "json" {
            Ok(serde_json::to_string_pretty(&json!({
                "chain": chain,
                "committed": value.is_some(),
                "flat_value": value,
            }))
            .map_err(|e| ApiError::ConfigError(e.to_string()))?)
        } else {
            Ok(format_flat_value_text(value.as_ref()))
        }
    }

    fn execute_validate(&self, format: &str) -> Result<String, ApiError> {
        let stats = self.store.stats();
        let duplicates = self.store.duplicate_display_names();
        if format == "json" {
            let dupes: Vec<serde_json::Value> = duplicates
                .iter()
                .map(|(name, count)| json!({ "name": name, "count": count }))
                .collect();
            Ok(serde_json::to_string_pretty(&json!({
                "valid": true,
                "stats": stats,
                "duplicate_display_names": dupes,
            }))
            .map_err(|e| ApiError::ConfigError(e.to_string()))?)
        } else {
            Ok(format_validate_text(&stats, &duplicates))
        }
    }

    fn execute_tree(&self, format: &str) -> Result<String, ApiError> {
        if format == "json" {
            let roots: Vec<serde_json::Value> = self
                .store
                .roots()
                .iter()
                .map(|idx| self.node_json(*idx))
                .collect();
            Ok(serde_json::to_string_pretty(&json!({ "roots": roots }))
                .map_err(|e| ApiError::ConfigError(e.to_string()))?)
        } else {
            Ok(format_tree_text(&self.store))
        }
    }

    fn node_json(&self, index: usize) -> serde_json::Value {
        let entry = self.store.node(index);
        let children: Vec<serde_json::Value> = entry
            .children
            .iter()
            .map(|child| self.node_json(*child))
            .collect();
        json!({
            "id": entry.id,
            "display_name": entry.display_name,
            "children": children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CliContext {
        CliContext::with_store(TaxonomyStore::from_forest(&default_forest()).unwrap())
    }

    #[test]
    fn test_resolve_text_output() {
        let cli = context();
        let output = cli
            .execute(&Commands::Resolve {
                identifier: "nintendo-gameboy".to_string(),
                format: "text".to_string(),
            })
            .unwrap();
        assert!(output.contains("Game Boy"));
        assert!(output.contains("nintendo-nes"));
    }

    #[test]
    fn test_resolve_miss_is_not_a_command_failure() {
        let cli = context();
        let output = cli
            .execute(&Commands::Resolve {
                identifier: "no-such-id".to_string(),
                format: "text".to_string(),
            })
            .unwrap();
        assert!(output.contains("Not found"));
    }

    #[test]
    fn test_derive_rejects_broken_chain() {
        let cli = context();
        let result = cli.execute(&Commands::Derive {
            chain: vec!["juegos".to_string(), "moviles-fundas".to_string()],
            format: "text".to_string(),
        });
        assert!(result.is_err());
    }
}
