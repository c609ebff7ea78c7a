use crate::domain::model::VolumeInfo;
use crate::domain::ports::VolumeSource;
use std::path::Path;
use sysinfo::Disks;

/// Mounted volumes as reported by `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemVolumes;

impl VolumeSource for SystemVolumes {
    fn volumes(&self) -> Vec<VolumeInfo> {
        let disks = Disks::new_with_refreshed_list();

        disks
            .list()
            .iter()
            .map(|disk| {
                let name = disk.name().to_string_lossy();
                VolumeInfo {
                    name: disk.mount_point().display().to_string(),
                    label: volume_label(&name, disk.mount_point()),
                    mount_point: disk.mount_point().to_path_buf(),
                    file_system: disk.file_system().to_string_lossy().to_string(),
                    available_space: disk.available_space(),
                    // Disks only lists mounted filesystems.
                    is_ready: true,
                }
            })
            .collect()
    }
}

/// Windows reports the volume label as the disk name. Unix reports the
/// device node instead, where the mount directory usually carries the label.
pub fn volume_label(disk_name: &str, mount_point: &Path) -> String {
    if !disk_name.is_empty() && !disk_name.starts_with("/dev/") {
        return disk_name.to_string();
    }

    mount_point
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
