//! Core types for template-sync

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A pull request on the hosting platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// A repository identified by owner and name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteRepo {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RemoteRepo {
    /// The `owner/name` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RemoteRepo {
    type Err = Error;

    /// Parse an `owner/name` slug (the `GITHUB_REPOSITORY` format)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(Error::Config(format!(
                "repository must be in owner/name format, got {s:?}"
            ))),
        }
    }
}

impl std::fmt::Display for RemoteRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What the orchestrator did to the destination repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// At least one tracked file differed; a commit was created and pushed
    Committed {
        /// Tracked paths included in the commit
        files: Vec<String>,
    },
    /// Every tracked file matched its committed state; no commit, no push
    NoChanges,
}

impl SyncOutcome {
    /// Whether this run produced a commit
    pub const fn committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Outcome of reconciling the sync branch with a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrOutcome {
    /// A new PR was opened
    Created(PullRequest),
    /// An open PR for this head/base pair already exists.
    ///
    /// The PR is `None` when existence was only reported by the create call's
    /// rejection rather than found by listing.
    AlreadyExists(Option<PullRequest>),
    /// The head branch has no commits ahead of base; nothing to open
    NothingToCompare,
}

impl std::fmt::Display for PrOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created(pr) => write!(f, "opened {}", pr.html_url),
            Self::AlreadyExists(Some(pr)) => write!(f, "already open at {}", pr.html_url),
            Self::AlreadyExists(None) => write!(f, "already open"),
            Self::NothingToCompare => write!(f, "nothing to compare"),
        }
    }
}

/// Result of one orchestration pass
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// What happened to the destination repository
    pub outcome: SyncOutcome,
    /// PR reconciliation result; `None` when the sync branch has no commits
    /// ahead of base and no PR is warranted
    pub pull_request: Option<PrOutcome>,
}
