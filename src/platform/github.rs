//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{PrOutcome, PullRequest, RemoteRepo};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    repo: RemoteRepo,
}

impl GitHubService {
    /// Create a new GitHub service.
    ///
    /// `host` selects a GitHub Enterprise instance; `None` targets
    /// github.com.
    pub fn new(token: &str, repo: RemoteRepo, host: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(host) = host {
            let base_url = format!("https://{host}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, repo })
    }
}

/// Helper to convert an octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

/// Map a create-PR rejection to a tolerated outcome, if it is one.
///
/// GitHub answers 422 with "A pull request already exists for owner:branch"
/// when the PR is open, and either a "No commits between base and head"
/// message or an invalid-`head` validation entry when there is nothing to
/// compare (head equals base, or head has no commits ahead). Anything else is
/// a real error and returns `None`.
fn classify_create_rejection(message: &str, errors: &[serde_json::Value]) -> Option<PrOutcome> {
    let mut messages = vec![message];
    messages.extend(
        errors
            .iter()
            .filter_map(|e| e.get("message").and_then(serde_json::Value::as_str)),
    );

    for msg in messages {
        if msg.contains("A pull request already exists") {
            return Some(PrOutcome::AlreadyExists(None));
        }
        if msg.contains("No commits between") {
            return Some(PrOutcome::NothingToCompare);
        }
    }

    let invalid_head = errors.iter().any(|e| {
        e.get("field").and_then(serde_json::Value::as_str) == Some("head")
            && e.get("code").and_then(serde_json::Value::as_str) == Some("invalid")
    });
    if invalid_head {
        return Some(PrOutcome::NothingToCompare);
    }

    None
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn find_existing_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>> {
        debug!(head, base, "finding existing PR");
        let qualified_head = format!("{}:{head}", self.repo.owner);

        let prs = self
            .client
            .pulls(&self.repo.owner, &self.repo.name)
            .list()
            .head(qualified_head)
            .base(base)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        let result = prs.items.first().map(pr_from_octocrab);
        if let Some(ref pr) = result {
            debug!(pr_number = pr.number, "found existing PR");
        } else {
            debug!("no existing PR found");
        }
        Ok(result)
    }

    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PrOutcome> {
        debug!(head, base, "creating PR");
        let result = self
            .client
            .pulls(&self.repo.owner, &self.repo.name)
            .create(title, head, base)
            .send()
            .await;

        match result {
            Ok(pr) => Ok(PrOutcome::Created(pr_from_octocrab(&pr))),
            Err(octocrab::Error::GitHub { source, .. }) => {
                let errors = source.errors.clone().unwrap_or_default();
                classify_create_rejection(&source.message, &errors).map_or_else(
                    || Err(Error::GitHubApi(source.message.clone())),
                    |outcome| {
                        debug!(?outcome, "create rejection downgraded to success");
                        Ok(outcome)
                    },
                )
            }
            Err(err) => Err(err.into()),
        }
    }

    fn repo(&self) -> &RemoteRepo {
        &self.repo
    }
}
