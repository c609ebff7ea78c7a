use crate::core::{FolderOutcome, Reporter, VolumeInfo, VolumeSource};
use crate::utils::error::UpdateError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub struct FixedVolumes(Vec<VolumeInfo>);

impl FixedVolumes {
    pub fn new(volumes: Vec<VolumeInfo>) -> Self {
        Self(volumes)
    }

    pub fn volume(name: &str, label: &str, mount_point: &Path, ready: bool) -> VolumeInfo {
        VolumeInfo {
            name: name.to_string(),
            label: label.to_string(),
            mount_point: mount_point.to_path_buf(),
            file_system: "FAT32".to_string(),
            available_space: 2 * 1024 * 1024 * 1024,
            is_ready: ready,
        }
    }
}

impl VolumeSource for FixedVolumes {
    fn volumes(&self) -> Vec<VolumeInfo> {
        self.0.clone()
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Event {
    Step(String),
    Note(String),
    DriveFound(String),
    DriveNotFound { error: String, ready: Vec<String> },
    FolderStarted(String),
    FolderFinished(String, FolderOutcome),
    Removing(PathBuf),
    Failed(PathBuf),
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Failed(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Removing(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn listed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .find_map(|e| match e {
                Event::DriveNotFound { ready, .. } => Some(ready),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn step(&self, title: &str) {
        self.push(Event::Step(title.to_string()));
    }

    fn note(&self, message: &str) {
        self.push(Event::Note(message.to_string()));
    }

    fn drive_found(&self, volume: &VolumeInfo) {
        self.push(Event::DriveFound(volume.name.clone()));
    }

    fn drive_not_found(&self, error: &UpdateError, ready: &[VolumeInfo]) {
        self.push(Event::DriveNotFound {
            error: error.to_string(),
            ready: ready.iter().map(|v| v.name.clone()).collect(),
        });
    }

    fn folder_started(&self, folder: &str) {
        self.push(Event::FolderStarted(folder.to_string()));
    }

    fn folder_finished(&self, folder: &str, outcome: &FolderOutcome) {
        self.push(Event::FolderFinished(folder.to_string(), outcome.clone()));
    }

    fn file_removing(&self, path: &Path) {
        self.push(Event::Removing(path.to_path_buf()));
    }

    fn file_failed(&self, path: &Path, _error: &UpdateError) {
        self.push(Event::Failed(path.to_path_buf()));
    }
}
