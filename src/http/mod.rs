//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, hot-swapped state)
//!     → request.rs (add / propagate request ID)
//!     → handler.rs (lookup, pick vanity / index / 404)
//!     → templates.rs (render HTML)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod server;
pub mod templates;

pub use handler::VanityHandler;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
pub use templates::RenderError;
