//! File propagation from the source tree into the destination tree.
//!
//! Copies are full-content overwrites; permissions beyond the default file
//! mode are not preserved. Whether a copy actually changed anything is decided
//! afterwards by git itself, not here.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Copy every tracked path from `source_dir` into `dest_dir`, creating
/// intermediate directories as needed.
///
/// Every source path is checked for existence before the first write, so a
/// missing tracked file (`PathNotFound`) aborts the run with the destination
/// tree untouched, wherever it sits in the list. Read and write failures
/// after that point still fail fast, naming the path that failed.
pub fn copy_all(paths: &[String], source_dir: &Path, dest_dir: &Path) -> Result<()> {
    for path in paths {
        if !source_dir.join(path).is_file() {
            return Err(Error::PathNotFound(path.clone()));
        }
    }
    for path in paths {
        copy_one(path, source_dir, dest_dir)?;
    }
    Ok(())
}

fn copy_one(path: &str, source_dir: &Path, dest_dir: &Path) -> Result<()> {
    let source = source_dir.join(path);
    let dest = dest_dir.join(path);
    debug!(from = %source.display(), to = %dest.display(), "copying");

    let contents = fs::read(&source).map_err(|e| copy_error(path, &e))?;

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| copy_error(path, &e))?;
    }

    fs::write(&dest, contents).map_err(|e| copy_error(path, &e))
}

fn copy_error(path: &str, err: &std::io::Error) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::PathNotFound(path.to_string())
    } else {
        Error::Copy {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
