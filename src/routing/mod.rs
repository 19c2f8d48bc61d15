//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Config load (at startup / reload):
//!     PathEntry { repo, vcs, display }
//!     → inference.rs (GitHub / Bitbucket / explicit VCS)
//!     → PathConfig
//!     → router.rs (sort, reject duplicates)
//!     → Freeze as immutable PathConfigSet
//!
//! Incoming request path
//!     → router.rs (lower-bound search + predecessor check)
//!     → Return: (PathConfig, subpath) or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at load time, immutable at runtime
//! - No regex in hot path (byte-wise prefix comparison only)
//! - Deterministic: same input always matches same route

pub mod inference;
pub mod router;

pub use inference::{infer_repo, InferenceError, InferredRepo, Vcs};
pub use router::{DuplicatePathError, PathConfig, PathConfigSet};
