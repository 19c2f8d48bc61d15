//! Vanity import path server.
//!
//! Serves `go-import` / `go-source` metadata for configured path prefixes
//! and redirects browsers to the package documentation.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{load_config, new_handler, ConfigError, VanityConfig};
pub use http::{HttpServer, VanityHandler};
pub use lifecycle::Shutdown;
