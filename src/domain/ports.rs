use crate::domain::model::{FolderOutcome, VolumeInfo};
use crate::utils::error::UpdateError;
use std::path::Path;

/// Source of mounted volumes.
pub trait VolumeSource: Send + Sync {
    fn volumes(&self) -> Vec<VolumeInfo>;
}

/// Receives progress and failures from an update run.
///
/// The core never writes to the console directly; everything a user should
/// see is routed through this trait.
pub trait Reporter: Send + Sync {
    /// Start of a major step (backup, cleaning, sync).
    fn step(&self, title: &str);

    /// Informational line that belongs to the current step.
    fn note(&self, message: &str);

    fn drive_found(&self, volume: &VolumeInfo);

    /// `error` is always `UpdateError::DriveNotFound`; `ready` holds every
    /// ready volume so the user can see what is connected.
    fn drive_not_found(&self, error: &UpdateError, ready: &[VolumeInfo]);

    fn folder_started(&self, folder: &str);
    fn folder_finished(&self, folder: &str, outcome: &FolderOutcome);

    /// Called before a file is deleted.
    fn file_removing(&self, path: &Path);

    /// A single file (or directory entry) could not be processed.
    fn file_failed(&self, path: &Path, error: &UpdateError);
}
