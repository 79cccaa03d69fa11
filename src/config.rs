//! Sync configuration
//!
//! Everything the orchestrator needs is passed in explicitly here; nothing is
//! read from the environment or compiled in. The CLI layer builds this from
//! flags and GitHub Actions input variables.

use crate::error::{Error, Result};
use std::path::Component;
use std::path::Path;

/// Configuration for one synchronization run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Relative paths of the tracked files, in order
    pub files: Vec<String>,
    /// Branch that receives the synchronized files
    pub sync_branch: String,
    /// Branch the pull request targets
    pub base_branch: String,
    /// Message for the sync commit
    pub commit_message: String,
    /// Commit author name
    pub author_name: String,
    /// Commit author email
    pub author_email: String,
    /// Pull request title
    pub pr_title: String,
}

impl SyncConfig {
    /// Validate the tracked file list and branch names.
    ///
    /// Tracked paths must be relative and must not contain `..`, so a path
    /// can never escape the source or destination tree.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(Error::Config("no files to synchronize".to_string()));
        }
        for file in &self.files {
            if file.trim().is_empty() {
                return Err(Error::Config("empty path in file list".to_string()));
            }
            let path = Path::new(file);
            if path.is_absolute() {
                return Err(Error::Config(format!("path must be relative: {file}")));
            }
            if path.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(Error::Config(format!("path must not contain '..': {file}")));
            }
        }
        if self.sync_branch == self.base_branch {
            return Err(Error::Config(format!(
                "sync branch and target branch are both {:?}",
                self.sync_branch
            )));
        }
        Ok(())
    }
}
