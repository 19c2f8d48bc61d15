//! HTML pages served to `go get` clients and browsers.
//!
//! Both pages are plain render functions writing into a `String`; every
//! interpolated value is HTML-escaped.

use std::fmt::{self, Write};

use crate::routing::Vcs;

/// Documentation viewer that browsers are redirected to.
pub const DOC_VIEWER: &str = "https://godoc.org/";

/// Failure while writing a page.
#[derive(Debug, thiserror::Error)]
#[error("cannot render the {page} page")]
pub struct RenderError {
    page: &'static str,
    #[source]
    source: fmt::Error,
}

impl RenderError {
    fn vanity(source: fmt::Error) -> Self {
        Self { page: "vanity", source }
    }

    fn index(source: fmt::Error) -> Self {
        Self { page: "index", source }
    }
}

/// Data for the per-path metadata page.
#[derive(Debug, Clone)]
pub struct VanityPage<'a> {
    /// Full import path (host + configured path).
    pub import: &'a str,
    /// Request path below the configured path.
    pub subpath: &'a str,
    pub repo: &'a str,
    pub display: &'a str,
    pub vcs: Vcs,
}

/// Render the page carrying `go-import` and `go-source` metadata.
pub fn render_vanity(page: &VanityPage<'_>) -> Result<String, RenderError> {
    let mut html = String::with_capacity(512);
    write_vanity(&mut html, page).map_err(RenderError::vanity)?;
    Ok(html)
}

fn write_vanity(html: &mut String, page: &VanityPage<'_>) -> fmt::Result {
    let import = escape(page.import);
    let doc_url = format!("{DOC_VIEWER}{import}/{}", escape(page.subpath));

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n");
    writeln!(
        html,
        "<meta name=\"go-import\" content=\"{import} {} {}\">",
        page.vcs,
        escape(page.repo)
    )?;
    writeln!(
        html,
        "<meta name=\"go-source\" content=\"{import} {}\">",
        escape(page.display)
    )?;
    writeln!(html, "<meta http-equiv=\"refresh\" content=\"0; url={doc_url}\">")?;
    html.push_str("</head>\n<body>\n");
    writeln!(
        html,
        "Nothing to see here; <a href=\"{doc_url}\">see the package on godoc</a>."
    )?;
    html.push_str("</body>\n</html>");
    Ok(())
}

/// Render the index listing every configured import path.
pub fn render_index<S: AsRef<str>>(host: &str, imports: &[S]) -> Result<String, RenderError> {
    let mut html = String::with_capacity(128 + imports.len() * 96);
    write_index(&mut html, host, imports).map_err(RenderError::index)?;
    Ok(html)
}

fn write_index<S: AsRef<str>>(html: &mut String, host: &str, imports: &[S]) -> fmt::Result {
    html.push_str("<!DOCTYPE html>\n<html>\n");
    writeln!(html, "<h1>{}</h1>", escape(host))?;
    html.push_str("<ul>\n");
    for import in imports {
        let import = escape(import.as_ref());
        write!(html, "<li><a href=\"{DOC_VIEWER}{import}\">{import}</a></li>")?;
    }
    html.push_str("\n</ul>\n</html>\n");
    Ok(())
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&#34;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
