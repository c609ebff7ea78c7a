use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// A mounted volume as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub name: String,
    pub label: String,
    pub mount_point: PathBuf,
    pub file_system: String,
    pub available_space: u64,
    pub is_ready: bool,
}

impl VolumeInfo {
    /// Free space in whole GiB, rendered with one decimal (`12.0`).
    pub fn free_space_gb(&self) -> String {
        format!("{:.1}", (self.available_space / BYTES_PER_GIB) as f64)
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "(no label)"
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl FileTally {
    pub fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FolderOutcome {
    Completed(FileTally),
    Skipped { reason: String },
    Failed { error: String },
}

impl FolderOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FolderOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderReport {
    pub folder: String,
    pub outcome: FolderOutcome,
}

impl FolderReport {
    pub fn new(folder: &str, outcome: FolderOutcome) -> Self {
        Self {
            folder: folder.to_string(),
            outcome,
        }
    }
}

/// Everything one update run did, in processing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub drive: Option<VolumeInfo>,
    pub backup_dir: Option<PathBuf>,
    pub backups: Vec<FolderReport>,
    pub cleaned: Vec<FolderReport>,
    pub synced: Vec<FolderReport>,
}

impl RunReport {
    pub fn drive_found(&self) -> bool {
        self.drive.is_some()
    }

    pub fn synced_count(&self) -> usize {
        self.synced.iter().filter(|r| !r.outcome.is_failed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(available_space: u64) -> VolumeInfo {
        VolumeInfo {
            name: "E:\\".to_string(),
            label: String::new(),
            mount_point: PathBuf::from("E:\\"),
            file_system: "FAT32".to_string(),
            available_space,
            is_ready: true,
        }
    }

    #[test]
    fn test_free_space_is_whole_gigabytes() {
        assert_eq!(volume(0).free_space_gb(), "0.0");
        assert_eq!(volume(BYTES_PER_GIB * 3 + BYTES_PER_GIB / 2).free_space_gb(), "3.0");
        assert_eq!(volume(BYTES_PER_GIB - 1).free_space_gb(), "0.0");
    }

    #[test]
    fn test_display_label_falls_back() {
        let mut v = volume(0);
        assert_eq!(v.display_label(), "(no label)");
        v.label = "GARMIN".to_string();
        assert_eq!(v.display_label(), "GARMIN");
    }

    #[test]
    fn test_synced_count_ignores_failures() {
        let report = RunReport {
            synced: vec![
                FolderReport::new("BirdsEye", FolderOutcome::Completed(FileTally::default())),
                FolderReport::new(
                    "GPX",
                    FolderOutcome::Failed {
                        error: "missing".to_string(),
                    },
                ),
            ],
            ..Default::default()
        };
        assert_eq!(report.synced_count(), 1);
    }
}
