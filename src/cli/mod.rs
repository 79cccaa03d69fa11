//! Command-line wiring
//!
//! Parses flags (each doubling as a GitHub Actions input variable), clones or
//! opens the working trees, and hands explicit configuration to the sync
//! workflow. Temporary clone directories are removed on every exit path by
//! `TempDir`'s drop; cleanup failure never fails the run.

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use template_sync::config::SyncConfig;
use template_sync::error::{Error, Result};
use template_sync::git::GitRepo;
use template_sync::platform::GitHubService;
use template_sync::sync;
use template_sync::types::{RemoteRepo, SyncOutcome};
use tempfile::TempDir;

/// Synchronize template files into a repository and open a pull request
#[derive(Parser, Debug)]
#[command(name = "tsync", version)]
pub struct Cli {
    /// Source repository holding the canonical template files (URL or owner/name)
    #[arg(long, env = "INPUT_REPO")]
    pub source_repo: String,

    /// Destination repository as owner/name (used for pull request API calls)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Existing checkout of the destination repository; cloned fresh when omitted
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Access token for clone, push and API calls
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Relative path of a file to synchronize (repeatable; newline separated in the env var)
    #[arg(long = "file", env = "INPUT_FILES", value_delimiter = '\n', required = true)]
    pub files: Vec<String>,

    /// Branch that receives the synchronized files
    #[arg(long, env = "INPUT_PULL_REQUEST_BRANCH", default_value = "file-sync")]
    pub sync_branch: String,

    /// Branch the pull request targets
    #[arg(long, env = "INPUT_TARGET_BRANCH", default_value = "main")]
    pub target_branch: String,

    /// Message for the sync commit
    #[arg(long, env = "INPUT_COMMIT_MESSAGE", default_value = "chore: sync template files")]
    pub commit_message: String,

    /// Commit author name
    #[arg(long, env = "INPUT_USER", default_value = "template-sync")]
    pub author_name: String,

    /// Commit author email
    #[arg(
        long,
        env = "INPUT_EMAIL",
        default_value = "template-sync@users.noreply.github.com"
    )]
    pub author_email: String,

    /// Pull request title
    #[arg(long, env = "INPUT_PR_TITLE", default_value = "Sync template files")]
    pub pr_title: String,

    /// GitHub Enterprise host for API calls and slug clones (e.g. github.example.com)
    #[arg(long, env = "GITHUB_HOST")]
    pub host: Option<String>,
}

/// Run one synchronization pass end to end.
pub async fn run(cli: Cli) -> Result<()> {
    let repo: RemoteRepo = cli.repository.parse()?;
    let token = cli.token.as_deref();

    let config = SyncConfig {
        files: cli
            .files
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect(),
        sync_branch: cli.sync_branch.clone(),
        base_branch: cli.target_branch.clone(),
        commit_message: cli.commit_message.clone(),
        author_name: cli.author_name.clone(),
        author_email: cli.author_email.clone(),
        pr_title: cli.pr_title.clone(),
    };
    config.validate()?;

    // API calls and slug-addressed clones must agree on the host.
    let host = cli.host.as_deref();
    let platform = GitHubService::new(
        token.ok_or_else(|| Error::Config("a token is required for pull request API calls".to_string()))?,
        repo.clone(),
        host,
    )?;

    // Clone the source into a temp dir that is removed when this fn returns.
    let source_tmp = TempDir::new()?;
    let source = GitRepo::clone(&cli.source_repo, token, host, &source_tmp.path().join("source"))?;

    // The destination is either an in-place CI checkout or a fresh clone.
    let _dest_tmp: Option<TempDir>;
    let dest = match &cli.workspace {
        Some(path) => {
            _dest_tmp = None;
            GitRepo::open(path)?
        }
        None => {
            let tmp = TempDir::new()?;
            let dest = GitRepo::clone(&repo.slug(), token, host, &tmp.path().join("dest"))?;
            _dest_tmp = Some(tmp);
            dest
        }
    };

    let report = sync::run(&config, source.workdir(), &dest, &platform).await?;

    match &report.outcome {
        SyncOutcome::Committed { files } => println!(
            "{} synced {} file(s) to {}",
            "✓".green(),
            files.len(),
            cli.sync_branch.bold()
        ),
        SyncOutcome::NoChanges => println!("{} nothing to sync", "✓".green()),
    }
    match &report.pull_request {
        Some(outcome) => println!("{} pull request: {outcome}", "✓".green()),
        None => println!("{} no pull request needed", "✓".green()),
    }

    Ok(())
}
