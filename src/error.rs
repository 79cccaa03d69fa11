//! Error types for template-sync

use std::path::PathBuf;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the git adapter, the file propagator and the GitHub API.
///
/// Most variants are produced by classifying the textual output of an
/// external tool, so they carry the raw diagnostic verbatim. Fatal errors
/// surface that text to the user unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cloning failed: unreachable remote or rejected credentials
    #[error("failed to clone {repo}: {message}")]
    Clone {
        /// Repository URL or `owner/name` slug (credentials redacted)
        repo: String,
        /// Diagnostic from git (credentials redacted)
        message: String,
    },

    /// The given path is not a git working tree
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// A branch or revision does not exist locally or remotely
    #[error("ref not found: {0}")]
    RefNotFound(String),

    /// A tracked file is absent from the source or working tree
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// The remote rejected the push (non-fast-forward or missing credentials)
    #[error("push rejected: {0}")]
    RejectedPush(String),

    /// Commit was attempted with an empty staged set
    #[error("nothing to commit")]
    NothingToCommit,

    /// Copying a tracked file failed for a reason other than a missing source
    #[error("failed to copy {path}: {message}")]
    Copy {
        /// Relative path of the file that failed
        path: String,
        /// Underlying I/O diagnostic
        message: String,
    },

    /// A git command failed in a way no classification rule recognizes
    #[error("git {command} failed: {stderr}")]
    Git {
        /// The git subcommand that failed
        command: String,
        /// Raw diagnostic text
        stderr: String,
    },

    /// GitHub API failure other than the tolerated rejections
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Invalid or missing configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Underlying I/O failure (spawning git, temp directories)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}
