//! Vanity request handling.
//!
//! # Responsibilities
//! - Resolve the request path against the configured paths
//! - Serve the vanity page, the index page, or 404
//! - Determine the effective host (configured override or request Host)
//!
//! # Design Decisions
//! - Handler state is immutable; reloads replace it wholesale
//! - `Cache-Control` is only set on vanity pages, not on index or 404
//! - Render failures become a 500 with a generic body and are logged

use std::time::Instant;

use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::http::templates::{self, VanityPage};
use crate::observability::metrics;
use crate::routing::PathConfigSet;

const RENDER_FAILURE: &str = "cannot render the page";

/// Immutable state serving vanity requests.
#[derive(Debug, Clone)]
pub struct VanityHandler {
    host: Option<String>,
    cache_control: String,
    paths: PathConfigSet,
}

impl VanityHandler {
    /// Create handler state. An empty `host` means "use the request's host".
    pub fn new(host: Option<String>, cache_max_age: u64, paths: PathConfigSet) -> Self {
        Self {
            host: host.filter(|h| !h.is_empty()),
            cache_control: format!("public, max-age={cache_max_age}"),
            paths,
        }
    }

    /// Configured host override, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn cache_control(&self) -> &str {
        &self.cache_control
    }

    pub fn paths(&self) -> &PathConfigSet {
        &self.paths
    }

    /// Host used to build import paths for this request.
    pub fn effective_host<'a>(&'a self, request_host: &'a str) -> &'a str {
        self.host.as_deref().unwrap_or(request_host)
    }

    /// Produce the response for a request to `path` on `request_host`.
    pub fn handle(&self, path: &str, request_host: &str) -> Response {
        let start = Instant::now();

        let Some((pc, subpath)) = self.paths.find(path) else {
            if path == "/" {
                return self.serve_index(request_host, start);
            }
            tracing::debug!(path = %path, "No vanity path matched");
            metrics::record_request(metrics::Outcome::NotFound, StatusCode::NOT_FOUND, start);
            return (StatusCode::NOT_FOUND, "404 page not found\n").into_response();
        };

        let import = format!("{}{}", self.effective_host(request_host), pc.path);
        let page = VanityPage {
            import: &import,
            subpath,
            repo: &pc.repo,
            display: &pc.display,
            vcs: pc.vcs,
        };

        match templates::render_vanity(&page) {
            Ok(body) => {
                tracing::debug!(import = %import, subpath = %subpath, vcs = %pc.vcs, "Serving vanity page");
                metrics::record_request(metrics::Outcome::Vanity, StatusCode::OK, start);
                ([(header::CACHE_CONTROL, self.cache_control.as_str())], Html(body)).into_response()
            }
            Err(e) => {
                tracing::error!(import = %import, error = %e, "Failed to render vanity page");
                metrics::record_request(
                    metrics::Outcome::RenderError,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    start,
                );
                (StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAILURE).into_response()
            }
        }
    }

    fn serve_index(&self, request_host: &str, start: Instant) -> Response {
        let host = self.effective_host(request_host);
        let imports: Vec<String> = self
            .paths
            .iter()
            .map(|pc| format!("{host}{}", pc.path))
            .collect();

        match templates::render_index(host, &imports) {
            Ok(body) => {
                metrics::record_request(metrics::Outcome::Index, StatusCode::OK, start);
                Html(body).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render index page");
                metrics::record_request(
                    metrics::Outcome::RenderError,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    start,
                );
                (StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAILURE).into_response()
            }
        }
    }
}

/// Host the client asked for: the Host header, else the URI authority.
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> &'a str {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default()
}
