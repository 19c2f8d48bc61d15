//! Configuration file watcher for hot reload.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::http::VanityHandler;

/// A watcher that monitors the configuration file for changes.
///
/// Only the vanity paths, host and cache age are reloaded; server
/// settings keep the values read at startup.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<VanityHandler>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for reloaded handler state.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<VanityHandler>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The containing directory is watched rather than the file itself, so
    /// editors and deploy tools that replace the file by renaming a new one
    /// over it keep triggering reloads.
    ///
    /// The returned watcher must be kept alive for events to be delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let file_name = self.path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        let dir = watch_dir(&self.path).to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_config(&event, &file_name) => {
                    tracing::info!(path = %path.display(), kind = ?event.kind, "Config file change detected, reloading");
                    reload(&path, &tx);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), dir = %dir.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; `.` for a bare file name.
fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Whether `event` creates, writes or renames onto the config file.
///
/// Renames are reported as `Modify(Name(_))`, so `is_modify` covers them.
fn touches_config(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_create() || event.kind.is_modify())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}

/// Load `path` and forward the new handler; keep the current one on error.
fn reload(path: &Path, tx: &mpsc::UnboundedSender<VanityHandler>) {
    match load_config(path) {
        Ok(loaded) => {
            if tx.send(loaded.handler).is_err() {
                tracing::warn!("Server no longer accepts configuration updates");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config. Keeping current configuration.");
        }
    }
}
