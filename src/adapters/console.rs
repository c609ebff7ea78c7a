use crate::domain::model::{FolderOutcome, VolumeInfo};
use crate::domain::ports::Reporter;
use crate::utils::error::UpdateError;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Writes human-readable progress to a console stream (stdout by default).
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn step(&self, title: &str) {
        self.line("");
        self.line(title);
    }

    fn note(&self, message: &str) {
        self.line(message);
    }

    fn drive_found(&self, volume: &VolumeInfo) {
        self.line("");
        self.line(&format!("Drive found: {} - {}", volume.name, volume.label));
    }

    fn drive_not_found(&self, error: &UpdateError, ready: &[VolumeInfo]) {
        self.line(&format!("{}.", error));
        self.line(error.recovery_suggestion());
        self.line("");
        self.line("Connected drives:");
        for volume in ready {
            self.line(&format!(
                "  {} - {} ({}, {} GB free)",
                volume.name,
                volume.display_label(),
                volume.file_system,
                volume.free_space_gb()
            ));
        }
    }

    fn folder_started(&self, folder: &str) {
        self.line(&format!("  {}...", folder));
    }

    fn folder_finished(&self, folder: &str, outcome: &FolderOutcome) {
        let text = match outcome {
            FolderOutcome::Completed(tally) if tally.failed == 0 => {
                format!("  {}: OK ({} file(s))", folder, tally.succeeded)
            }
            FolderOutcome::Completed(tally) => format!(
                "  {}: done with problems ({} ok, {} failed)",
                folder, tally.succeeded, tally.failed
            ),
            FolderOutcome::Skipped { reason } => format!("  {}: skipped ({})", folder, reason),
            FolderOutcome::Failed { error } => format!("  {}: error: {}", folder, error),
        };
        self.line(&text);
    }

    fn file_removing(&self, path: &Path) {
        self.line(&format!("    Deleting file: {}", path.display()));
    }

    fn file_failed(&self, path: &Path, error: &UpdateError) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        if error.is_permission_denied() {
            self.line(&format!("    Access denied: {}", name));
        } else {
            self.line(&format!("    Warning for {}: {}", name, error));
        }
    }
}
