use crate::config::UpdaterConfig;
use crate::core::{VolumeInfo, VolumeSource};

pub struct DriveLocator<'a, V: VolumeSource> {
    volumes: &'a V,
    config: &'a UpdaterConfig,
}

impl<'a, V: VolumeSource> DriveLocator<'a, V> {
    pub fn new(volumes: &'a V, config: &'a UpdaterConfig) -> Self {
        Self { volumes, config }
    }

    pub fn ready_volumes(&self) -> Vec<VolumeInfo> {
        self.volumes
            .volumes()
            .into_iter()
            .filter(|v| v.is_ready)
            .collect()
    }

    /// First ready volume whose label contains the keyword, ignoring case.
    pub fn find(&self) -> Option<VolumeInfo> {
        let keyword = self.config.drive_keyword.to_lowercase();
        let found = self
            .ready_volumes()
            .into_iter()
            .find(|v| !v.label.is_empty() && v.label.to_lowercase().contains(&keyword));

        match &found {
            Some(v) => tracing::debug!("Matched volume {} ({})", v.name, v.label),
            None => tracing::debug!("No volume label contains '{}'", self.config.drive_keyword),
        }
        found
    }
}
