//! Platform services for the hosting API
//!
//! Provides the pull request operations the reconciler needs, behind a trait
//! so orchestration tests can run against a mock.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PrOutcome, PullRequest, RemoteRepo};
use async_trait::async_trait;
use tracing::{debug, info};

/// Pull request operations against the hosting platform.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Find an existing open PR for the given head/base pair.
    async fn find_existing_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>>;

    /// Open a PR from `head` to `base`.
    ///
    /// Implementations must downgrade the platform's "a pull request already
    /// exists" and "no commits between" rejections to the corresponding
    /// [`PrOutcome`] variants instead of erroring; everything else (auth
    /// failure, missing repository, rate limiting) propagates.
    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PrOutcome>;

    /// The repository this service talks to.
    fn repo(&self) -> &RemoteRepo;
}

/// Ensure exactly one logically active PR exists for `head` -> `base`.
///
/// Safe to call any number of times: a pre-existing open PR is reused, and
/// both the "already exists" and "nothing to compare" rejections from the
/// create call count as success.
pub async fn reconcile_pull_request(
    platform: &dyn PlatformService,
    head: &str,
    base: &str,
    title: &str,
) -> Result<PrOutcome> {
    debug!(head, base, "reconciling pull request");

    if let Some(pr) = platform.find_existing_pr(head, base).await? {
        info!(number = pr.number, url = %pr.html_url, "pull request already open");
        return Ok(PrOutcome::AlreadyExists(Some(pr)));
    }

    let outcome = platform.create_pr(head, base, title).await?;
    match &outcome {
        PrOutcome::Created(pr) => info!(number = pr.number, url = %pr.html_url, "opened pull request"),
        PrOutcome::AlreadyExists(_) => info!("pull request already exists"),
        PrOutcome::NothingToCompare => info!("head has no commits ahead of base; no pull request needed"),
    }
    Ok(outcome)
}
