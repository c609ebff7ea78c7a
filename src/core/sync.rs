use crate::config::UpdaterConfig;
use crate::core::transfer::copy_tree;
use crate::core::{FolderOutcome, FolderReport, Reporter};
use std::path::Path;

pub struct FolderSync<'a> {
    config: &'a UpdaterConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> FolderSync<'a> {
    pub fn new(config: &'a UpdaterConfig, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Copies every managed folder from the source root onto `target_root`.
    /// A missing source folder fails that folder only.
    pub fn sync_all(&self, target_root: &Path) -> Vec<FolderReport> {
        self.config
            .folders
            .iter()
            .map(|folder| {
                let name = folder.name.as_str();
                self.reporter.folder_started(name);

                let source = self.config.source_root.join(name);
                let outcome = match copy_tree(&source, &target_root.join(name), self.reporter) {
                    Ok(tally) => FolderOutcome::Completed(tally),
                    Err(e) => {
                        tracing::warn!("Sync of {} failed: {}", name, e);
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
