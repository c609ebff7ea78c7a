use crate::config::UpdaterConfig;
use crate::core::backup::BackupManager;
use crate::core::cleaner::Cleaner;
use crate::core::locator::DriveLocator;
use crate::core::sync::FolderSync;
use crate::core::{Reporter, RunReport, VolumeSource};
use crate::utils::error::{Result, UpdateError};
use chrono::Local;

/// Runs locate, backup, clean and sync in that order against one drive.
pub struct Updater<V: VolumeSource, R: Reporter> {
    config: UpdaterConfig,
    volumes: V,
    reporter: R,
}

impl<V: VolumeSource, R: Reporter> Updater<V, R> {
    pub fn new(config: UpdaterConfig, volumes: V, reporter: R) -> Self {
        Self {
            config,
            volumes,
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// One full update. A missing drive ends the run early but is not an
    /// `Err`: it is reported with the connected volumes and the returned
    /// report has no drive.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        let locator = DriveLocator::new(&self.volumes, &self.config);
        let Some(drive) = locator.find() else {
            let missing = UpdateError::DriveNotFound {
                keyword: self.config.drive_keyword.clone(),
            };
            tracing::info!("{}", missing);
            self.reporter.drive_not_found(&missing, &locator.ready_volumes());
            return Ok(report);
        };
        self.reporter.drive_found(&drive);
        tracing::info!("Updating {} ({})", drive.name, drive.label);

        let target_root = self.config.target_root(&drive.mount_point);
        report.drive = Some(drive);

        let backup = BackupManager::new(&self.config, &self.reporter);
        let existing = backup.existing_folders(&target_root);
        if existing.is_empty() {
            self.reporter.note("No existing folders to back up.");
            self.reporter.note("Skipping backup and cleaning.");
        } else {
            let backup_dir = backup.create_backup_dir(Local::now())?;
            self.reporter.step(&format!(
                "Creating backup in: {}",
                backup_dir.display()
            ));
            report.backups = backup.back_up(&target_root, &backup_dir, &existing);
            report.backup_dir = Some(backup_dir);

            self.reporter.step("Cleaning files on the device...");
            report.cleaned = Cleaner::new(&self.config, &self.reporter).clean_all(&target_root);
        }

        self.reporter.step("Updating files on the device...");
        report.synced = FolderSync::new(&self.config, &self.reporter).sync_all(&target_root);
        self.reporter.note(&format!(
            "{} of {} folder(s) updated.",
            report.synced_count(),
            report.synced.len()
        ));

        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(&report) {
                Ok(summary) => tracing::debug!("Run summary: {}", summary),
                Err(e) => tracing::warn!("Run summary unavailable: {}", e),
            }
        }
        Ok(report)
    }
}
