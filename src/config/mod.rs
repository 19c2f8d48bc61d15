//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (cache age, path normalization)
//!     → routing::inference (repo URL → repo, vcs, display)
//!     → VanityHandler (validated, immutable)
//!     → shared via ArcSwap to the HTTP server
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → atomic swap of Arc<VanityHandler>
//!     → invalid config is logged and ignored
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Loading is all-or-nothing: the first error rejects the whole file

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, new_handler, ConfigError, LoadedConfig};
pub use schema::{PathEntry, ServerSettings, VanityConfig};
pub use watcher::ConfigWatcher;
