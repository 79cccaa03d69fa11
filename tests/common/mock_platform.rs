//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use template_sync::error::{Error, Result};
use template_sync::platform::PlatformService;
use template_sync::types::{PrOutcome, PullRequest, RemoteRepo};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Created PRs become findable, so repeat reconciliation behaves like the
///   real platform
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    repo: RemoteRepo,
    next_pr_number: AtomicU64,
    /// PRs created through this mock; `find_existing_pr` sees them
    created: Mutex<Vec<PullRequest>>,
    /// Pre-seeded responses for `find_existing_pr`, keyed by (head, base)
    find_pr_responses: Mutex<HashMap<(String, String), PullRequest>>,
    /// Forced outcome for `create_pr` (e.g. the race where find saw nothing
    /// but the platform still answers "already exists")
    create_outcome_override: Mutex<Option<PrOutcome>>,
    // Call tracking
    find_pr_calls: Mutex<Vec<(String, String)>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_find_pr: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self {
            repo: RemoteRepo {
                owner: "test-owner".to_string(),
                name: "test-repo".to_string(),
            },
            next_pr_number: AtomicU64::new(1),
            created: Mutex::new(Vec::new()),
            find_pr_responses: Mutex::new(HashMap::new()),
            create_outcome_override: Mutex::new(None),
            find_pr_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    /// Seed the response for `find_existing_pr` for a head/base pair
    pub fn set_find_pr_response(&self, head: &str, base: &str, pr: PullRequest) {
        self.find_pr_responses
            .lock()
            .unwrap()
            .insert((head.to_string(), base.to_string()), pr);
    }

    /// Force the outcome of the next `create_pr` calls
    pub fn set_create_outcome(&self, outcome: PrOutcome) {
        *self.create_outcome_override.lock().unwrap() = Some(outcome);
    }

    /// Make `find_existing_pr` return an error
    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// All (head, base) pairs `find_existing_pr` was called with
    pub fn find_pr_calls(&self) -> Vec<(String, String)> {
        self.find_pr_calls.lock().unwrap().clone()
    }

    /// All `create_pr` calls
    pub fn create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `create_pr` was never called
    pub fn assert_create_pr_not_called(&self) {
        let calls = self.create_pr_calls();
        assert!(calls.is_empty(), "expected no create_pr calls, got: {calls:?}");
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn find_existing_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>> {
        self.find_pr_calls
            .lock()
            .unwrap()
            .push((head.to_string(), base.to_string()));

        if let Some(msg) = self.error_on_find_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let key = (head.to_string(), base.to_string());
        if let Some(pr) = self.find_pr_responses.lock().unwrap().get(&key) {
            return Ok(Some(pr.clone()));
        }

        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.head_ref == head && pr.base_ref == base)
            .cloned())
    }

    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PrOutcome> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        if let Some(outcome) = self.create_outcome_override.lock().unwrap().as_ref() {
            return Ok(outcome.clone());
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/test-owner/test-repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        };
        self.created.lock().unwrap().push(pr.clone());
        Ok(PrOutcome::Created(pr))
    }

    fn repo(&self) -> &RemoteRepo {
        &self.repo
    }
}
