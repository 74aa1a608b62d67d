//! # Statboard CLI
//!
//! Headless host for the Statboard scene store. Every command starts from
//! the default template and prints the resulting scene document as JSON.
//!
//! ## Usage
//!
//! ```bash
//! statboard template
//! statboard apply edits.json
//! statboard lookup "Ibrahim Maza" --endpoint https://example.test/search-player
//! statboard import-image photo.png
//! ```
//!
//! A script is a JSON array of mutations:
//!
//! ```json
//! [
//!   {"op": "create", "item": "circle-lg"},
//!   {"op": "commit", "id": "box1", "patch": {"value": "12"}}
//! ]
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use statboard_core::{ImageHandle, Mutation, SceneDocument, SceneRenderer, SceneStore};
use statboard_services::{
    search_and_apply, HttpPlayerLookup, ImagePipeline, LookupConfig, PassthroughRemover,
};

/// Command-line arguments for statboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "statboard")]
#[command(about = "Football stats infographic scene engine")]
#[command(version)]
pub struct CliArgs {
    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// What to do with the scene
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the default template
    Template,

    /// Apply a mutation script as one batch
    Apply {
        /// Path to a JSON array of mutations
        script: PathBuf,
    },

    /// Look a player up and apply their numbers to the template
    Lookup {
        /// Free-text player name
        query: String,

        /// Lookup service endpoint
        #[arg(long, env = "STATBOARD_LOOKUP_URL")]
        endpoint: String,

        /// Bearer key for the lookup service
        #[arg(long, env = "STATBOARD_LOOKUP_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Request timeout in seconds
        #[arg(long, env = "STATBOARD_LOOKUP_TIMEOUT_SECS", default_value = "30")]
        timeout_secs: u64,
    },

    /// Place an image in the player slot
    ImportImage {
        /// Image reference (path, URL or object key)
        reference: String,
    },
}

/// Renders scene documents as JSON text.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SceneRenderer for JsonRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&mut self, document: &SceneDocument) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
    }
}

/// Read a mutation script.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a JSON array of mutations.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Mutation>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script {}", path.display()))
}

/// Run a command against a fresh store and render the result.
///
/// # Errors
///
/// Returns the first failure from script loading, the store, or a
/// collaborator. Nothing is printed on failure.
pub async fn run(args: CliArgs) -> anyhow::Result<String> {
    let mut store = SceneStore::new();

    match args.command {
        Command::Template => {}
        Command::Apply { script } => {
            let mutations = load_script(&script)?;
            let outcomes = store
                .apply_batch(mutations)
                .with_context(|| format!("script {} rejected", script.display()))?;
            tracing::info!("Applied {} mutations from {}", outcomes.len(), script.display());
        }
        Command::Lookup {
            query,
            endpoint,
            api_key,
            timeout_secs,
        } => {
            let mut config =
                LookupConfig::new(&endpoint)?.with_timeout(Duration::from_secs(timeout_secs));
            if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
                config = config.with_api_key(key);
            }
            let lookup = HttpPlayerLookup::new(config)?;
            let applied = search_and_apply(&lookup, &mut store, &query).await?;
            tracing::info!("Lookup for {query:?} updated {applied} nodes");
        }
        Command::ImportImage { reference } => {
            let pipeline = ImagePipeline::new(PassthroughRemover);
            match pipeline
                .process_and_import(&mut store, ImageHandle::new(reference))
                .await?
            {
                Some(resolution) => {
                    tracing::info!("Imported {}", resolution.image());
                }
                None => tracing::warn!("Upload superseded before it finished"),
            }
        }
    }

    let mut renderer = JsonRenderer::new(!args.compact);
    Ok(renderer.render(&store.document())?)
}
