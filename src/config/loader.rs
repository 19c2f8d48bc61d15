//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{ServerSettings, VanityConfig};
use crate::config::validation::{normalize_path, validate_cache_max_age};
use crate::http::VanityHandler;
use crate::routing::{infer_repo, DuplicatePathError, InferenceError, PathConfig, PathConfigSet};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("cache_max_age is negative: {0}")]
    NegativeCacheAge(i64),

    #[error("configuration for {path}: {source}")]
    Inference {
        path: String,
        #[source]
        source: InferenceError,
    },

    #[error("configuration has a {0}")]
    DuplicatePath(#[from] DuplicatePathError),
}

/// A validated configuration, split into its reloadable and fixed parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub handler: VanityHandler,
    pub server: ServerSettings,
}

/// Parse a YAML configuration document.
pub fn parse_config(content: &[u8]) -> Result<VanityConfig, ConfigError> {
    Ok(serde_yaml::from_slice(content)?)
}

/// Build the immutable handler state from a parsed configuration.
///
/// Runs repository inference for every path entry and sorts the result.
pub fn build_handler(config: &VanityConfig) -> Result<VanityHandler, ConfigError> {
    let cache_max_age = validate_cache_max_age(config.cache_max_age)?;

    let mut configs = Vec::with_capacity(config.paths.len());
    for (path, entry) in &config.paths {
        let inferred = infer_repo(&entry.repo, &entry.vcs, &entry.display).map_err(|source| {
            ConfigError::Inference {
                path: path.clone(),
                source,
            }
        })?;
        configs.push(PathConfig {
            path: normalize_path(path).to_string(),
            repo: inferred.repo,
            display: inferred.display,
            vcs: inferred.vcs,
        });
    }
    let paths = PathConfigSet::new(configs)?;

    Ok(VanityHandler::new(config.host.clone(), cache_max_age, paths))
}

/// Parse and validate a YAML document into handler state.
pub fn new_handler(content: &[u8]) -> Result<VanityHandler, ConfigError> {
    build_handler(&parse_config(content)?)
}

/// Load and validate configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = fs::read(path)?;
    let config = parse_config(&content)?;
    let handler = build_handler(&config)?;

    tracing::debug!(
        path = %path.display(),
        vanity_paths = handler.paths().len(),
        "Configuration parsed"
    );

    Ok(LoadedConfig {
        handler,
        server: config.server,
    })
}
