//! Thin wrapper over the `git` executable.
//!
//! Runs one command with a working directory, captures both streams and
//! reports success. No interpretation of the output happens here; callers in
//! the adapter classify the text per command.

use crate::error::Result;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured output of one git invocation
pub(crate) struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl GitOutput {
    /// The diagnostic text of a failed command.
    ///
    /// Git writes most errors to stderr, but a few (for example "nothing to
    /// commit") go to stdout, so fall back to it when stderr is empty.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Run `git` with the given arguments in `dir`, capturing output.
///
/// A non-zero exit is not an error at this layer; only failure to spawn the
/// process is. `log_args` is what gets logged, letting callers hide argument
/// lists that embed credentials.
pub(crate) fn run_git_logged_as(dir: &Path, args: &[&str], log_args: &str) -> Result<GitOutput> {
    debug!(dir = %dir.display(), "git {log_args}");
    let output = Command::new("git").args(args).current_dir(dir).output()?;

    let result = GitOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    };
    if !result.success {
        debug!(diagnostic = %result.diagnostic(), "git {log_args} exited non-zero");
    }
    Ok(result)
}

/// Run `git` with the given arguments in `dir`, logging the arguments as-is.
pub(crate) fn run_git(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    let log_args = args.join(" ");
    run_git_logged_as(dir, args, &log_args)
}
