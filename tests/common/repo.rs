//! Git repository fixtures: a local bare "origin" plus helpers to inspect it.
//!
//! The end-to-end tests drive the real `git` binary against these fixtures,
//! so branch creation, pushes and upstream tracking behave exactly as they do
//! against a hosted remote, without any network.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use template_sync::config::SyncConfig;
use tempfile::TempDir;

/// Run git in `dir`, panicking (with stderr) on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}

/// A bare "origin" repository seeded with a commit on `main`.
pub struct RemoteFixture {
    _tmp: TempDir,
    bare: PathBuf,
}

impl RemoteFixture {
    /// Create a bare origin whose `main` holds a README only.
    pub fn new() -> Self {
        Self::with_files(&[])
    }

    /// Create a bare origin whose `main` holds a README plus `files`.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let tmp = TempDir::new().unwrap();
        let bare = tmp.path().join("origin.git");
        let seed = tmp.path().join("seed");
        fs::create_dir(&bare).unwrap();
        fs::create_dir(&seed).unwrap();

        git(&bare, &["init", "-q", "--bare", "-b", "main", "."]);
        git(&seed, &["init", "-q", "-b", "main", "."]);
        git(&seed, &["config", "user.name", "fixture"]);
        git(&seed, &["config", "user.email", "fixture@example.com"]);
        git(&seed, &["config", "commit.gpgsign", "false"]);

        fs::write(seed.join("README.md"), "seed\n").unwrap();
        for (path, content) in files {
            let full = seed.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        git(&seed, &["add", "."]);
        git(&seed, &["commit", "-q", "-m", "initial"]);
        git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
        git(&seed, &["push", "-q", "origin", "main"]);

        Self { _tmp: tmp, bare }
    }

    /// Clone URL (a local path).
    pub fn url(&self) -> String {
        self.bare.to_string_lossy().into_owned()
    }

    /// `%an|%s` log lines for a branch, newest first; empty if absent.
    pub fn log(&self, branch: &str) -> Vec<String> {
        git_stdout(&self.bare, &["log", "--format=%an|%s", branch])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of commits reachable from a branch; 0 if the branch is absent.
    pub fn commit_count(&self, branch: &str) -> usize {
        self.log(branch).len()
    }

    /// Content of `path` as committed on `branch`, if both exist.
    pub fn show(&self, branch: &str, path: &str) -> Option<String> {
        git_stdout(&self.bare, &["show", &format!("{branch}:{path}")])
    }
}

/// A source template directory holding the given (path, content) files.
pub fn source_dir(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (path, content) in files {
        let full = tmp.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
    tmp
}

/// Standard sync configuration used by the end-to-end tests.
pub fn test_config(files: &[&str]) -> SyncConfig {
    SyncConfig {
        files: files.iter().map(ToString::to_string).collect(),
        sync_branch: "file-sync".to_string(),
        base_branch: "main".to_string(),
        commit_message: "chore: sync template files".to_string(),
        author_name: "template-sync".to_string(),
        author_email: "template-sync@example.com".to_string(),
        pr_title: "Sync template files".to_string(),
    }
}
