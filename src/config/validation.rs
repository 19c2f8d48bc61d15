//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (cache max-age >= 0)
//! - Normalize path keys (strip trailing `/`)
//!
//! # Design Decisions
//! - Stops at the first error; a config is either fully valid or rejected
//! - Pure functions, run before a config is accepted into the system

use crate::config::loader::ConfigError;
use crate::config::schema::DEFAULT_CACHE_MAX_AGE;

/// Resolve the effective cache max-age in seconds.
pub fn validate_cache_max_age(cache_max_age: Option<i64>) -> Result<u64, ConfigError> {
    let age = cache_max_age.unwrap_or(DEFAULT_CACHE_MAX_AGE);
    u64::try_from(age).map_err(|_| ConfigError::NegativeCacheAge(age))
}

/// Strip a single trailing slash, so `/foo/` and `/foo` name the same route.
pub fn normalize_path(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
