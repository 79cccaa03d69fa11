//! template-sync: propagate template files into downstream repositories.
//!
//! A one-shot, non-interactive tool for CI: copy a fixed list of files from a
//! canonical source repository into a destination repository, commit and push
//! only when content actually differs, and open (or reuse) a pull request
//! carrying the change.
//!
//! The interesting part is the idempotent mutation workflow in [`sync`]; the
//! git plumbing lives in [`git`], pull request reconciliation in [`platform`].

pub mod config;
pub mod error;
pub mod git;
pub mod platform;
pub mod propagate;
pub mod sync;
pub mod types;
