use crate::utils::error::{Result, UpdateError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path_component, validate_required_field,
    validate_unique_names, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DRIVE_KEYWORD: &str = "Garmin";
pub const DEFAULT_TARGET_SUBFOLDER: &str = "Garmin";
pub const DEFAULT_BACKUP_FOLDER_NAME: &str = "nav_backup";
pub const DEFAULT_PRESERVED_EXTENSION: &str = "img";

/// How stale files are removed from a managed folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleanRule {
    /// Only files directly inside the folder.
    TopLevel,
    /// Top level of the folder, plus everything beneath the named subfolders.
    TopLevelAndNested { subfolders: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedFolder {
    pub name: String,
    pub rule: CleanRule,
}

impl ManagedFolder {
    pub fn top_level(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rule: CleanRule::TopLevel,
        }
    }

    pub fn nested(name: &str, subfolders: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            rule: CleanRule::TopLevelAndNested {
                subfolders: subfolders.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

pub fn default_folders() -> Vec<ManagedFolder> {
    vec![
        ManagedFolder::top_level("BirdsEye"),
        ManagedFolder::top_level("CustomMaps"),
        ManagedFolder::nested("GPX", &["Nav", "Archive"]),
    ]
}

/// Settings for one updater instance. Built once, then only borrowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    pub drive_keyword: String,
    pub target_subfolder: String,
    pub backup_folder_name: String,
    /// Stored without the leading dot.
    pub preserved_extension: String,
    pub folders: Vec<ManagedFolder>,
    /// Directory holding the fresh copies of the managed folders.
    pub source_root: PathBuf,
    /// Directory under which `backup_folder_name` is created.
    pub backup_base: PathBuf,
}

impl UpdaterConfig {
    pub fn new(source_root: impl Into<PathBuf>, backup_base: impl Into<PathBuf>) -> Self {
        Self {
            drive_keyword: DEFAULT_DRIVE_KEYWORD.to_string(),
            target_subfolder: DEFAULT_TARGET_SUBFOLDER.to_string(),
            backup_folder_name: DEFAULT_BACKUP_FOLDER_NAME.to_string(),
            preserved_extension: DEFAULT_PRESERVED_EXTENSION.to_string(),
            folders: default_folders(),
            source_root: source_root.into(),
            backup_base: backup_base.into(),
        }
    }

    /// Source folders sit next to the executable; backups go to the desktop.
    pub fn from_environment() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let source_root = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| UpdateError::ConfigError {
                message: format!("Executable path has no parent: {}", exe.display()),
            })?;

        let desktop = dirs::desktop_dir().or_else(dirs::home_dir);
        let backup_base = validate_required_field("backup_base", &desktop)?.clone();

        Ok(Self::new(source_root, backup_base))
    }

    pub fn with_preserved_extension(mut self, extension: &str) -> Self {
        self.preserved_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_folders(mut self, folders: Vec<ManagedFolder>) -> Self {
        self.folders = folders;
        self
    }

    pub fn target_root(&self, mount_point: &Path) -> PathBuf {
        mount_point.join(&self.target_subfolder)
    }

    pub fn backup_root(&self) -> PathBuf {
        self.backup_base.join(&self.backup_folder_name)
    }
}

impl Validate for UpdaterConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("drive_keyword", &self.drive_keyword)?;
        validate_path_component("target_subfolder", &self.target_subfolder)?;
        validate_path_component("backup_folder_name", &self.backup_folder_name)?;
        validate_path_component("preserved_extension", &self.preserved_extension)?;
        if self.preserved_extension.starts_with('.') {
            return Err(UpdateError::InvalidConfigValueError {
                field: "preserved_extension".to_string(),
                value: self.preserved_extension.clone(),
                reason: "Extension must be given without the leading dot".to_string(),
            });
        }

        validate_unique_names("folders", self.folders.iter().map(|f| f.name.as_str()))?;
        for folder in &self.folders {
            validate_path_component("folders", &folder.name)?;
            if let CleanRule::TopLevelAndNested { subfolders } = &folder.rule {
                for sub in subfolders {
                    validate_path_component(&format!("folders.{}.subfolders", folder.name), sub)?;
                }
            }
        }

        Ok(())
    }
}
