//! Configuration schema definitions.
//!
//! This module defines the YAML document read at startup and on reload.
//! All types derive Serde traits; every field is optional.
//!
//! ```yaml
//! host: example.org
//! cache_max_age: 3600
//! paths:
//!   /portmidi:
//!     repo: https://github.com/rakyll/portmidi
//!   /hg:
//!     repo: https://bitbucket.org/user/project
//!     vcs: hg
//! server:
//!   bind_address: 0.0.0.0:8080
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default `Cache-Control` max-age: 24 hours.
pub const DEFAULT_CACHE_MAX_AGE: i64 = 86_400;

/// Root configuration document.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VanityConfig {
    /// Host used in import paths; defaults to the request's Host header.
    pub host: Option<String>,

    /// `Cache-Control` max-age in seconds (default 86400, must be >= 0).
    pub cache_max_age: Option<i64>,

    /// Vanity path → repository entry.
    pub paths: BTreeMap<String, PathEntry>,

    /// Process-level settings. Not hot-reloaded.
    pub server: ServerSettings,
}

/// A single `paths` entry. Empty strings mean "not set".
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PathEntry {
    /// Repository URL.
    pub repo: String,

    /// `go-source` display template override.
    pub display: String,

    /// Explicit VCS (bzr, git, hg, svn).
    pub vcs: String,
}

/// Listener and observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
