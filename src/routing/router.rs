//! Path configuration set and longest-prefix lookup.
//!
//! # Responsibilities
//! - Store the configured vanity paths, sorted by path
//! - Resolve a request path to its configuration and subpath
//! - Reject duplicate paths at construction time
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(log n) lookup: one lower-bound search plus a check of its predecessor
//! - Paths compare as raw bytes, so `/a` < `/a/b` < `/a0`

use crate::routing::inference::Vcs;

/// One configured vanity path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// URL path prefix without a trailing slash.
    pub path: String,
    /// Canonical repository root.
    pub repo: String,
    /// `go-source` template, possibly empty.
    pub display: String,
    pub vcs: Vcs,
}

/// Two entries resolved to the same path after trimming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate path {0:?}")]
pub struct DuplicatePathError(pub String);

/// Configured paths, sorted ascending by `path`.
#[derive(Debug, Clone, Default)]
pub struct PathConfigSet {
    configs: Vec<PathConfig>,
}

impl PathConfigSet {
    /// Sort `configs` by path and freeze them.
    pub fn new(mut configs: Vec<PathConfig>) -> Result<Self, DuplicatePathError> {
        configs.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(pair) = configs.windows(2).find(|w| w[0].path == w[1].path) {
            return Err(DuplicatePathError(pair[0].path.clone()));
        }
        Ok(Self { configs })
    }

    /// Find the configuration serving `path`.
    ///
    /// Returns the matched entry and the remainder of `path` below it
    /// (empty on an exact match).
    pub fn find<'a>(&'a self, path: &'a str) -> Option<(&'a PathConfig, &'a str)> {
        let i = self.configs.partition_point(|pc| pc.path.as_str() < path);
        if let Some(pc) = self.configs.get(i) {
            if pc.path == path {
                return Some((pc, ""));
            }
        }
        let prev = self.configs.get(i.checked_sub(1)?)?;
        let subpath = path
            .strip_prefix(prev.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))?;
        Some((prev, subpath))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathConfig> {
        self.configs.iter()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> PathConfigSet {
        PathConfigSet::new(
            paths
                .iter()
                .map(|p| PathConfig {
                    path: p.to_string(),
                    repo: format!("https://example.com{p}"),
                    display: String::new(),
                    vcs: Vcs::Git,
                })
                .collect(),
        )
        .unwrap()
    }

    fn lookup<'a>(set: &'a PathConfigSet, path: &'a str) -> Option<(&'a str, &'a str)> {
        set.find(path).map(|(pc, sub)| (pc.path.as_str(), sub))
    }

    #[test]
    fn test_sorted_on_construction() {
        let s = set(&["/zz", "/a", "/m"]);
        let paths: Vec<_> = s.iter().map(|pc| pc.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/m", "/zz"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let configs = vec![
            PathConfig { path: "/a".into(), repo: "r1".into(), display: String::new(), vcs: Vcs::Git },
            PathConfig { path: "/a".into(), repo: "r2".into(), display: String::new(), vcs: Vcs::Hg },
        ];
        assert_eq!(
            PathConfigSet::new(configs).unwrap_err(),
            DuplicatePathError("/a".to_string())
        );
    }

    #[test]
    fn test_exact_match() {
        let s = set(&["/portmidi", "/zero"]);
        assert_eq!(lookup(&s, "/portmidi"), Some(("/portmidi", "")));
        assert_eq!(lookup(&s, "/zero"), Some(("/zero", "")));
    }

    #[test]
    fn test_subpath_match() {
        let s = set(&["/portmidi", "/zero"]);
        assert_eq!(lookup(&s, "/portmidi/foo"), Some(("/portmidi", "foo")));
        assert_eq!(lookup(&s, "/portmidi/foo/bar"), Some(("/portmidi", "foo/bar")));
        assert_eq!(lookup(&s, "/portmidi/"), Some(("/portmidi", "")));
    }

    #[test]
    fn test_no_match() {
        let s = set(&["/portmidi", "/zero"]);
        assert_eq!(lookup(&s, "/"), None);
        assert_eq!(lookup(&s, "/port"), None);
        assert_eq!(lookup(&s, "/portmidix"), None);
        assert_eq!(lookup(&s, "/zzz"), None);
        assert_eq!(lookup(&s, "/a"), None);
        assert_eq!(lookup(&PathConfigSet::default(), "/a"), None);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let s = set(&["/a", "/a/b"]);
        assert_eq!(lookup(&s, "/a/b"), Some(("/a/b", "")));
        assert_eq!(lookup(&s, "/a/b/x"), Some(("/a/b", "x")));
        assert_eq!(lookup(&s, "/a/b/c/d"), Some(("/a/b", "c/d")));
        assert_eq!(lookup(&s, "/a/0"), Some(("/a", "0")));
    }

    #[test]
    fn test_only_the_predecessor_is_checked() {
        // Entries sorting between a parent and the request hide the parent.
        let s = set(&["/a", "/a/b"]);
        assert_eq!(lookup(&s, "/a/x"), None);

        let s = set(&["/foo", "/foo-bar"]);
        assert_eq!(lookup(&s, "/foo/x"), None);
    }

    #[test]
    fn test_sibling_with_shared_prefix() {
        let s = set(&["/foo", "/foo-bar"]);
        assert_eq!(lookup(&s, "/foo-bar/x"), Some(("/foo-bar", "x")));
        assert_eq!(lookup(&s, "/foo"), Some(("/foo", "")));
        assert_eq!(lookup(&s, "/foo-baz"), None);
    }

    #[test]
    fn test_root_entry() {
        // A configured "/" trims to the empty path.
        let s = set(&["", "/other"]);
        assert_eq!(lookup(&s, "/"), Some(("", "")));
        assert_eq!(lookup(&s, "/other/x"), Some(("/other", "x")));
    }

    #[test]
    fn test_len() {
        let s = set(&["/a", "/b"]);
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert!(PathConfigSet::default().is_empty());
    }
}
