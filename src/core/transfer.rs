use crate::core::{FileTally, Reporter};
use crate::utils::error::{Result, UpdateError};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copies `source` into `destination`, overwriting files that
/// already exist and creating missing directories.
///
/// Only a missing `source` or an uncreatable `destination` fails the whole
/// call. Everything below that is per-entry: failures are reported, counted
/// and skipped.
pub fn copy_tree(source: &Path, destination: &Path, reporter: &dyn Reporter) -> Result<FileTally> {
    if !source.is_dir() {
        return Err(UpdateError::FolderNotFound {
            path: source.to_path_buf(),
        });
    }
    fs::create_dir_all(destination).map_err(|e| UpdateError::io(destination, e))?;

    let mut tally = FileTally::default();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(source).to_path_buf();
                let err = UpdateError::from(e);
                tracing::warn!("Skipping unreadable entry {}: {}", path.display(), err);
                reporter.file_failed(&path, &err);
                tally.record(false);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            if let Err(e) = fs::create_dir_all(&target) {
                let err = UpdateError::io(&target, e);
                tracing::warn!("{}", err);
                reporter.file_failed(&target, &err);
                tally.record(false);
            }
            continue;
        }

        if !entry.file_type().is_file() {
            tracing::debug!("Not a regular file, skipped: {}", entry.path().display());
            continue;
        }

        match fs::copy(entry.path(), &target) {
            Ok(bytes) => {
                tracing::debug!("Copied {} ({} bytes)", target.display(), bytes);
                tally.record(true);
            }
            Err(e) => {
                let err = UpdateError::io(entry.path(), e);
                tracing::warn!("Copy failed for {}: {}", entry.path().display(), err);
                reporter.file_failed(entry.path(), &err);
                tally.record(false);
            }
        }
    }

    Ok(tally)
}
