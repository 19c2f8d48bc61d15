//! Repository URL inference.
//!
//! # Responsibilities
//! - Recognize GitHub and Bitbucket repository URLs
//! - Derive the canonical repository URL and VCS kind
//! - Supply a default source-browser (`go-source`) template
//! - Pass any other URL through unchanged, requiring an explicit VCS
//!
//! # Design Decisions
//! - Hosts are checked in a fixed order: GitHub, Bitbucket, fallback
//! - Only the `https://` form of each host is recognized
//! - An explicit `display` always wins over the inferred default
//! - Pure function: no I/O, the repository is never contacted

use std::fmt;
use std::str::FromStr;

const GITHUB_PREFIX: &str = "https://github.com/";
const BITBUCKET_PREFIX: &str = "https://bitbucket.org/";
const GIT_SUFFIX: &str = ".git";

/// Version control systems understood by the `go-import` protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vcs {
    Bzr,
    Git,
    Hg,
    Svn,
}

impl Vcs {
    /// Identifier as it appears in configuration and in the `go-import` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vcs::Bzr => "bzr",
            Vcs::Git => "git",
            Vcs::Hg => "hg",
            Vcs::Svn => "svn",
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vcs {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bzr" => Ok(Vcs::Bzr),
            "git" => Ok(Vcs::Git),
            "hg" => Ok(Vcs::Hg),
            "svn" => Ok(Vcs::Svn),
            other => Err(InferenceError::UnknownVcs(other.to_string())),
        }
    }
}

/// Reasons a repository entry cannot be turned into vanity metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("detected GitHub repository, but VCS = {0}")]
    GitHubVcsMismatch(String),

    #[error("VCS is hg, but repo has .git suffix")]
    HgWithGitSuffix,

    #[error("must specify either 'vcs: git' or 'vcs: hg' for Bitbucket repository")]
    BitbucketVcsRequired,

    #[error("detected Bitbucket repository, but VCS = {0}")]
    BitbucketUnsupportedVcs(String),

    #[error("cannot infer VCS from {0}")]
    CannotInferVcs(String),

    #[error("unknown VCS {0}")]
    UnknownVcs(String),
}

/// Canonical metadata derived for one repository entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredRepo {
    /// Repository root as advertised in the `go-import` tag.
    pub repo: String,
    pub vcs: Vcs,
    /// Source-browser template for the `go-source` tag (may be empty).
    pub display: String,
}

/// Infer the canonical repository, VCS and display template for an entry.
///
/// `vcs_hint` and `display` are the raw configured values; empty means
/// "not set".
pub fn infer_repo(
    repo_url: &str,
    vcs_hint: &str,
    display: &str,
) -> Result<InferredRepo, InferenceError> {
    if let Some((user, repo)) = github_repo(repo_url) {
        if !vcs_hint.is_empty() && vcs_hint != "git" {
            return Err(InferenceError::GitHubVcsMismatch(vcs_hint.to_string()));
        }
        let base = format!("{GITHUB_PREFIX}{user}/{repo}");
        return Ok(InferredRepo {
            display: display_or(display, || {
                format!("{base} {base}/tree/master{{/dir}} {base}/blob/master{{/dir}}/{{file}}#L{{line}}")
            }),
            repo: format!("{base}{GIT_SUFFIX}"),
            vcs: Vcs::Git,
        });
    }

    if let Some((user, repo, is_git)) = bitbucket_repo(repo_url) {
        let base = format!("{BITBUCKET_PREFIX}{user}/{repo}");
        return match vcs_hint {
            "hg" if is_git => Err(InferenceError::HgWithGitSuffix),
            "hg" => Ok(InferredRepo {
                display: display_or(display, || {
                    format!("{base} {base}/src/default{{/dir}} {base}/src/default{{/dir}}/{{file}}#{{file}}-{{line}}")
                }),
                repo: base,
                vcs: Vcs::Hg,
            }),
            "git" => Ok(bitbucket_git(base, display)),
            "" if is_git => Ok(bitbucket_git(base, display)),
            "" => Err(InferenceError::BitbucketVcsRequired),
            other => Err(InferenceError::BitbucketUnsupportedVcs(other.to_string())),
        };
    }

    if vcs_hint.is_empty() {
        return Err(InferenceError::CannotInferVcs(repo_url.to_string()));
    }
    Ok(InferredRepo {
        repo: repo_url.to_string(),
        vcs: vcs_hint.parse()?,
        display: display.to_string(),
    })
}

fn bitbucket_git(base: String, display: &str) -> InferredRepo {
    InferredRepo {
        display: display_or(display, || {
            format!("{base} {base}/src/master{{/dir}} {base}/src/master{{/dir}}/{{file}}#{{file}}-{{line}}")
        }),
        repo: format!("{base}{GIT_SUFFIX}"),
        vcs: Vcs::Git,
    }
}

fn display_or(display: &str, default: impl FnOnce() -> String) -> String {
    if display.is_empty() {
        default()
    } else {
        display.to_string()
    }
}

/// Split `rest` into exactly `user/repo`.
fn user_and_repo(rest: &str) -> Option<(&str, &str)> {
    let (user, repo) = rest.split_once('/')?;
    if repo.contains('/') {
        return None;
    }
    Some((user, repo))
}

/// Returns `(user, repo)` with any `.git` suffix removed from `repo`.
fn github_repo(url: &str) -> Option<(&str, &str)> {
    let (user, repo) = user_and_repo(url.strip_prefix(GITHUB_PREFIX)?)?;
    Some((user, repo.strip_suffix(GIT_SUFFIX).unwrap_or(repo)))
}

/// Returns `(user, repo, is_git)`; `is_git` records a stripped `.git` suffix.
fn bitbucket_repo(url: &str) -> Option<(&str, &str, bool)> {
    let (user, repo) = user_and_repo(url.strip_prefix(BITBUCKET_PREFIX)?)?;
    match repo.strip_suffix(GIT_SUFFIX) {
        Some(stripped) => Some((user, stripped, true)),
        None => Some((user, repo, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_inference() {
        let inferred = infer_repo("https://github.com/rakyll/portmidi", "", "").unwrap();
        assert_eq!(inferred.repo, "https://github.com/rakyll/portmidi.git");
        assert_eq!(inferred.vcs, Vcs::Git);
        assert_eq!(
            inferred.display,
            "https://github.com/rakyll/portmidi \
             https://github.com/rakyll/portmidi/tree/master{/dir} \
             https://github.com/rakyll/portmidi/blob/master{/dir}/{file}#L{line}"
        );
    }

    #[test]
    fn test_github_git_suffix_stripped() {
        let inferred = infer_repo("https://github.com/u/r.git", "git", "").unwrap();
        assert_eq!(inferred.repo, "https://github.com/u/r.git");
        assert!(inferred.display.starts_with("https://github.com/u/r "));
    }

    #[test]
    fn test_github_git_suffix_without_hint() {
        let inferred = infer_repo("https://github.com/u/r.git", "", "").unwrap();
        assert_eq!(inferred.repo, "https://github.com/u/r.git");
        assert_eq!(inferred.vcs, Vcs::Git);
        assert_eq!(
            inferred.display,
            "https://github.com/u/r \
             https://github.com/u/r/tree/master{/dir} \
             https://github.com/u/r/blob/master{/dir}/{file}#L{line}"
        );
    }

    #[test]
    fn test_github_conflicting_vcs() {
        for hint in ["hg", "svn", "bzr", "cvs"] {
            let err = infer_repo("https://github.com/u/r", hint, "").unwrap_err();
            assert_eq!(err, InferenceError::GitHubVcsMismatch(hint.to_string()));
        }
    }

    #[test]
    fn test_github_explicit_display_kept() {
        let inferred = infer_repo("https://github.com/u/r", "", "a b c").unwrap();
        assert_eq!(inferred.display, "a b c");
    }

    #[test]
    fn test_github_nested_path_falls_through() {
        // Not user/repo, so it is treated as an opaque URL.
        let err = infer_repo("https://github.com/u/r/sub", "", "").unwrap_err();
        assert_eq!(
            err,
            InferenceError::CannotInferVcs("https://github.com/u/r/sub".to_string())
        );

        let inferred = infer_repo("https://github.com/u/r/sub", "git", "").unwrap();
        assert_eq!(inferred.repo, "https://github.com/u/r/sub");
        assert_eq!(inferred.display, "");
    }

    #[test]
    fn test_bitbucket_git_suffix_infers_git() {
        let inferred = infer_repo("https://bitbucket.org/u/r.git", "", "").unwrap();
        assert_eq!(inferred.repo, "https://bitbucket.org/u/r.git");
        assert_eq!(inferred.vcs, Vcs::Git);
        assert_eq!(
            inferred.display,
            "https://bitbucket.org/u/r \
             https://bitbucket.org/u/r/src/master{/dir} \
             https://bitbucket.org/u/r/src/master{/dir}/{file}#{file}-{line}"
        );
    }

    #[test]
    fn test_bitbucket_explicit_git() {
        let inferred = infer_repo("https://bitbucket.org/u/r", "git", "").unwrap();
        assert_eq!(inferred.repo, "https://bitbucket.org/u/r.git");
        assert_eq!(inferred.vcs, Vcs::Git);
    }

    #[test]
    fn test_bitbucket_hg() {
        let inferred = infer_repo("https://bitbucket.org/u/r", "hg", "").unwrap();
        assert_eq!(inferred.repo, "https://bitbucket.org/u/r");
        assert_eq!(inferred.vcs, Vcs::Hg);
        assert_eq!(
            inferred.display,
            "https://bitbucket.org/u/r \
             https://bitbucket.org/u/r/src/default{/dir} \
             https://bitbucket.org/u/r/src/default{/dir}/{file}#{file}-{line}"
        );
    }

    #[test]
    fn test_bitbucket_ambiguous_vcs() {
        let err = infer_repo("https://bitbucket.org/u/r", "", "").unwrap_err();
        assert_eq!(err, InferenceError::BitbucketVcsRequired);
    }

    #[test]
    fn test_bitbucket_hg_with_git_suffix() {
        let err = infer_repo("https://bitbucket.org/u/r.git", "hg", "").unwrap_err();
        assert_eq!(err, InferenceError::HgWithGitSuffix);
    }

    #[test]
    fn test_bitbucket_unsupported_vcs() {
        let err = infer_repo("https://bitbucket.org/u/r", "svn", "").unwrap_err();
        assert_eq!(err, InferenceError::BitbucketUnsupportedVcs("svn".to_string()));
    }

    #[test]
    fn test_fallback_requires_known_vcs() {
        let err = infer_repo("https://example.com/repo", "", "").unwrap_err();
        assert!(matches!(err, InferenceError::CannotInferVcs(_)));

        let err = infer_repo("https://example.com/repo", "darcs", "").unwrap_err();
        assert_eq!(err, InferenceError::UnknownVcs("darcs".to_string()));

        for (hint, vcs) in [("bzr", Vcs::Bzr), ("git", Vcs::Git), ("hg", Vcs::Hg), ("svn", Vcs::Svn)] {
            let inferred = infer_repo("https://example.com/repo", hint, "x y z").unwrap();
            assert_eq!(inferred.repo, "https://example.com/repo");
            assert_eq!(inferred.vcs, vcs);
            assert_eq!(inferred.display, "x y z");
        }
    }

    #[test]
    fn test_http_github_is_not_recognized() {
        let inferred = infer_repo("http://github.com/u/r", "git", "").unwrap();
        assert_eq!(inferred.repo, "http://github.com/u/r");
        assert_eq!(inferred.display, "");
    }

    #[test]
    fn test_vcs_round_trips_through_str() {
        for vcs in [Vcs::Bzr, Vcs::Git, Vcs::Hg, Vcs::Svn] {
            assert_eq!(vcs.as_str().parse::<Vcs>().unwrap(), vcs);
        }
    }
}
