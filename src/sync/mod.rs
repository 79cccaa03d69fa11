//! The repository-mutation workflow.
//!
//! One strictly sequential pass over the destination repository:
//!
//! ```text
//! set author -> fetch -> branch -> checkout -> reset --hard origin/<branch>
//!   -> propagate files -> modified? -> [stage -> commit -> push] -> reconcile PR
//! ```
//!
//! The pass is idempotent: a second run with unchanged source files finds a
//! clean tree after propagation and terminates on the no-op path, and the
//! reconciler reuses any PR that is already open. Every step failure is fatal
//! to the run; there are no retries and no partial commits.

use crate::config::SyncConfig;
use crate::error::Result;
use crate::git::GitRepo;
use crate::platform::{PlatformService, reconcile_pull_request};
use crate::propagate;
use crate::types::{SyncOutcome, SyncReport};
use std::path::Path;
use tracing::info;

/// Run one synchronization pass against an opened destination working tree.
///
/// `source_dir` is the root of the source checkout holding the canonical
/// template files. On the no-op path the run still reconciles a pull request
/// if a previous run left the sync branch with commits ahead of base.
pub async fn run(
    config: &SyncConfig,
    source_dir: &Path,
    dest: &GitRepo,
    platform: &dyn PlatformService,
) -> Result<SyncReport> {
    config.validate()?;

    info!(branch = %config.sync_branch, "preparing sync branch");
    dest.set_author(&config.author_name, &config.author_email)?;
    dest.fetch()?;
    dest.create_branch(&config.sync_branch)?;
    dest.checkout(&config.sync_branch)?;
    // Synchronize with the remote tip so propagation applies on top of the
    // remote branch state, never on top of stale local edits.
    dest.reset_hard(&config.sync_branch)?;

    propagate::copy_all(&config.files, source_dir, dest.workdir())?;

    let outcome = if dest.any_modified(&config.files)? {
        // Stage the full tracked set; re-adding an unmodified file is a no-op.
        for file in &config.files {
            dest.stage(file)?;
        }
        dest.commit(&config.commit_message)?;
        dest.push(&config.sync_branch)?;
        info!(files = config.files.len(), branch = %config.sync_branch, "pushed sync commit");
        SyncOutcome::Committed {
            files: config.files.clone(),
        }
    } else {
        info!("tracked files already match; nothing to commit");
        SyncOutcome::NoChanges
    };

    // Reconcile whenever the branch is ahead of base, even if this run
    // committed nothing: a prior run may have pushed without getting as far
    // as opening the PR.
    let ahead = dest.commits_ahead(&config.base_branch, &config.sync_branch)?;
    let pull_request = if ahead > 0 {
        Some(
            reconcile_pull_request(
                platform,
                &config.sync_branch,
                &config.base_branch,
                &config.pr_title,
            )
            .await?,
        )
    } else {
        info!("sync branch has no commits ahead of base; skipping pull request");
        None
    };

    Ok(SyncReport {
        outcome,
        pull_request,
    })
}
