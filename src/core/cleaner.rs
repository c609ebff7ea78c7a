use crate::config::{CleanRule, ManagedFolder, UpdaterConfig};
use crate::core::{FileTally, FolderOutcome, FolderReport, Reporter};
use crate::utils::error::{Result, UpdateError};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub struct Cleaner<'a> {
    config: &'a UpdaterConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> Cleaner<'a> {
    pub fn new(config: &'a UpdaterConfig, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Applies each managed folder's rule under `target_root`. Folders that
    /// do not exist on the target are recorded as skipped without output.
    pub fn clean_all(&self, target_root: &Path) -> Vec<FolderReport> {
        let mut reports = Vec::new();
        for folder in &self.config.folders {
            let path = target_root.join(&folder.name);
            if !path.is_dir() {
                reports.push(FolderReport::new(
                    &folder.name,
                    FolderOutcome::Skipped {
                        reason: "not on device".to_string(),
                    },
                ));
                continue;
            }

            self.reporter.folder_started(&folder.name);
            let outcome = match self.clean_folder(&path, folder) {
                Ok(tally) => FolderOutcome::Completed(tally),
                Err(e) => {
                    tracing::warn!("Cleaning {} failed: {}", folder.name, e);
                    FolderOutcome::Failed {
                        error: e.user_friendly_message(),
                    }
                }
            };
            self.reporter.folder_finished(&folder.name, &outcome);
            reports.push(FolderReport::new(&folder.name, outcome));
        }
        reports
    }

    pub fn clean_folder(&self, path: &Path, folder: &ManagedFolder) -> Result<FileTally> {
        let mut tally = self.clean_top_level(path)?;

        if let CleanRule::TopLevelAndNested { subfolders } = &folder.rule {
            for sub in subfolders {
                let nested = path.join(sub);
                if nested.is_dir() {
                    let nested_tally = self.clean_recursive(&nested);
                    tally.succeeded += nested_tally.succeeded;
                    tally.failed += nested_tally.failed;
                }
            }
        }

        Ok(tally)
    }

    /// Files directly inside `path`; subdirectories are not entered.
    fn clean_top_level(&self, path: &Path) -> Result<FileTally> {
        let mut tally = FileTally::default();
        let entries = fs::read_dir(path).map_err(|e| UpdateError::io(path, e))?;

        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) if entry.path().is_file() => files.push(entry.path()),
                Ok(_) => {}
                Err(e) => {
                    let err = UpdateError::io(path, e);
                    self.reporter.file_failed(path, &err);
                    tally.record(false);
                }
            }
        }
        files.sort();

        for file in files.iter().filter(|f| !self.is_preserved(f)) {
            tally.record(self.remove(file));
        }
        Ok(tally)
    }

    /// Every file at any depth beneath `path`.
    fn clean_recursive(&self, path: &Path) -> FileTally {
        let mut tally = FileTally::default();
        for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if !self.is_preserved(entry.path()) {
                        tally.record(self.remove(entry.path()));
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let failed_path = e.path().unwrap_or(path).to_path_buf();
                    let err = UpdateError::from(e);
                    self.reporter.file_failed(&failed_path, &err);
                    tally.record(false);
                }
            }
        }
        tally
    }

    pub fn is_preserved(&self, file: &Path) -> bool {
        file.extension()
            .map(|ext| {
                ext.to_string_lossy()
                    .eq_ignore_ascii_case(&self.config.preserved_extension)
            })
            .unwrap_or(false)
    }

    fn remove(&self, file: &Path) -> bool {
        let full = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        self.reporter.file_removing(&full);
        match fs::remove_file(file) {
            Ok(()) => {
                tracing::debug!("Deleted {}", full.display());
                true
            }
            Err(e) => {
                let err = UpdateError::io(file, e);
                tracing::warn!("Delete failed: {}", err);
                self.reporter.file_failed(file, &err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::RecordingReporter;
    use tempfile::TempDir;

    fn config(temp: &TempDir) -> UpdaterConfig {
        UpdaterConfig::new(temp.path().join("src"), temp.path().join("Desktop"))
    }

    #[test]
    fn test_top_level_rule_keeps_preserved_extension() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("BirdsEye");
        fs::create_dir_all(folder.join("sub")).unwrap();
        fs::write(folder.join("a.img"), b"a").unwrap();
        fs::write(folder.join("b.jpg"), b"b").unwrap();
        fs::write(folder.join("C.IMG"), b"c").unwrap();
        fs::write(folder.join("README"), b"r").unwrap();
        fs::write(folder.join("sub/deep.jpg"), b"d").unwrap();

        let config = config(&temp);
        let reporter = RecordingReporter::new();
        let cleaner = Cleaner::new(&config, &reporter);
        let tally = cleaner
            .clean_folder(&folder, &ManagedFolder::top_level("BirdsEye"))
            .unwrap();

        assert_eq!(tally, FileTally { succeeded: 2, failed: 0 });
        assert!(folder.join("a.img").exists());
        assert!(folder.join("C.IMG").exists());
        assert!(!folder.join("b.jpg").exists());
        assert!(!folder.join("README").exists());
        // Top-level rule does not descend.
        assert!(folder.join("sub/deep.jpg").exists());
        assert_eq!(reporter.removed().len(), 2);
    }

    #[test]
    fn test_nested_rule_cleans_named_subfolders_at_any_depth() {
        let temp = TempDir::new().unwrap();
        let gpx = temp.path().join("GPX");
        fs::create_dir_all(gpx.join("Nav/2023")).unwrap();
        fs::create_dir_all(gpx.join("Archive")).unwrap();
        fs::create_dir_all(gpx.join("Other")).unwrap();
        fs::write(gpx.join("current.gpx"), b"x").unwrap();
        fs::write(gpx.join("tiles.img"), b"x").unwrap();
        fs::write(gpx.join("Nav/track1.gpx"), b"x").unwrap();
        fs::write(gpx.join("Nav/2023/old_track.gpx"), b"x").unwrap();
        fs::write(gpx.join("Archive/old.img"), b"x").unwrap();
        fs::write(gpx.join("Other/keep.gpx"), b"x").unwrap();

        let config = config(&temp);
        let reporter = RecordingReporter::new();
        let cleaner = Cleaner::new(&config, &reporter);
        let tally = cleaner
            .clean_folder(&gpx, &ManagedFolder::nested("GPX", &["Nav", "Archive"]))
            .unwrap();

        assert_eq!(tally.succeeded, 3);
        assert!(!gpx.join("current.gpx").exists());
        assert!(gpx.join("tiles.img").exists());
        assert!(!gpx.join("Nav/track1.gpx").exists());
        assert!(!gpx.join("Nav/2023/old_track.gpx").exists());
        assert!(gpx.join("Nav/2023").is_dir());
        assert!(gpx.join("Archive/old.img").exists());
        assert!(gpx.join("Other/keep.gpx").exists());
    }

    #[test]
    fn test_clean_all_skips_missing_folders() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("Garmin");
        fs::create_dir_all(target.join("CustomMaps")).unwrap();
        fs::write(target.join("CustomMaps/notes.txt"), b"x").unwrap();

        let config = config(&temp);
        let reporter = RecordingReporter::new();
        let reports = Cleaner::new(&config, &reporter).clean_all(&target);

        assert_eq!(reports.len(), 3);
        assert!(matches!(reports[0].outcome, FolderOutcome::Skipped { .. }));
        assert_eq!(reports[1].folder, "CustomMaps");
        assert_eq!(
            reports[1].outcome,
            FolderOutcome::Completed(FileTally { succeeded: 1, failed: 0 })
        );
        assert!(matches!(reports[2].outcome, FolderOutcome::Skipped { .. }));
        assert!(!target.join("CustomMaps/notes.txt").exists());
    }

    #[test]
    fn test_is_preserved_ignores_case() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        let reporter = RecordingReporter::new();
        let cleaner = Cleaner::new(&config, &reporter);
        assert!(cleaner.is_preserved(Path::new("map.img")));
        assert!(cleaner.is_preserved(Path::new("MAP.Img")));
        assert!(!cleaner.is_preserved(Path::new("map.img.bak")));
        assert!(!cleaner.is_preserved(Path::new("img")));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_failure_does_not_stop_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let gpx = temp.path().join("GPX");
        let locked = gpx.join("Nav/locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(gpx.join("current.gpx"), b"x").unwrap();
        fs::write(gpx.join("Nav/a.gpx"), b"x").unwrap();
        fs::write(locked.join("stuck.gpx"), b"x").unwrap();
        fs::write(gpx.join("Nav/z.gpx"), b"x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Directory permissions are not enforced for root.
        if fs::write(locked.join("writable"), b"").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let config = config(&temp);
        let reporter = RecordingReporter::new();
        let tally = Cleaner::new(&config, &reporter)
            .clean_folder(&gpx, &ManagedFolder::nested("GPX", &["Nav", "Archive"]))
            .unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(tally, FileTally { succeeded: 3, failed: 1 });
        assert!(!gpx.join("current.gpx").exists());
        assert!(!gpx.join("Nav/a.gpx").exists());
        assert!(!gpx.join("Nav/z.gpx").exists());
        assert!(locked.join("stuck.gpx").exists());
        assert_eq!(reporter.failures(), vec![locked.join("stuck.gpx")]);
    }
}

