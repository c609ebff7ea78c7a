use crate::config::UpdaterConfig;
use crate::core::transfer::copy_tree;
use crate::core::{FolderOutcome, FolderReport, Reporter};
use crate::utils::error::{Result, UpdateError};
use chrono::{DateTime, Local};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct BackupManager<'a> {
    config: &'a UpdaterConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> BackupManager<'a> {
    pub fn new(config: &'a UpdaterConfig, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Managed folders present under `target_root`, in declared order.
    pub fn existing_folders(&self, target_root: &Path) -> Vec<&'a str> {
        self.config
            .folders
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| target_root.join(name).is_dir())
            .collect()
    }

    /// Creates `<backup root>/<YYYYMMDD>/<HH_MM_SS>`.
    ///
    /// An existing time directory is never reused: a `_2`, `_3`, ... suffix is
    /// appended until a fresh directory can be created.
    pub fn create_backup_dir(&self, now: DateTime<Local>) -> Result<PathBuf> {
        let date_dir = self
            .config
            .backup_root()
            .join(now.format("%Y%m%d").to_string());
        fs::create_dir_all(&date_dir).map_err(|e| UpdateError::io(&date_dir, e))?;

        let time = now.format("%H_%M_%S").to_string();
        let mut candidate = date_dir.join(&time);
        let mut suffix = 2;
        loop {
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = date_dir.join(format!("{}_{}", time, suffix));
                    suffix += 1;
                }
                Err(e) => return Err(UpdateError::io(&candidate, e)),
            }
        }
    }

    /// Copies each of `folders` from `target_root` into `backup_dir`.
    pub fn back_up(
        &self,
        target_root: &Path,
        backup_dir: &Path,
        folders: &[&str],
    ) -> Vec<FolderReport> {
        self.reporter
            .note(&format!("Copying {} folder(s) into the backup:", folders.len()));

        folders
            .iter()
            .map(|name| {
                self.reporter.folder_started(name);
                let outcome = match copy_tree(
                    &target_root.join(name),
                    &backup_dir.join(name),
                    self.reporter,
                ) {
                    Ok(tally) => FolderOutcome::Completed(tally),
                    Err(e) => {
                        tracing::warn!("Backup of {} failed: {}", name, e);
                        FolderOutcome::Failed {
                            error: e.user_friendly_message(),
                        }
                    }
                };
                self.reporter.folder_finished(name, &outcome);
                FolderReport::new(name, outcome)
            })
            .collect()
    }
}
