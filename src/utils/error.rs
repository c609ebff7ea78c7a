use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("No ready volume with a label containing '{keyword}' was found")]
    DriveNotFound { keyword: String },

    #[error("Directory not found: {}", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("IO error at {}: {}", path.display(), source)]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Device,
    Filesystem,
    Configuration,
    Internal,
}

impl UpdateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DriveNotFound { .. } => ErrorCategory::Device,
            Self::FolderNotFound { .. }
            | Self::FileIo { .. }
            | Self::WalkError(_)
            | Self::IoError(_) => ErrorCategory::Filesystem,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        let kind = match self {
            Self::FileIo { source, .. } => Some(source.kind()),
            Self::IoError(e) => Some(e.kind()),
            Self::WalkError(e) => e.io_error().map(|io| io.kind()),
            _ => None,
        };
        kind == Some(ErrorKind::PermissionDenied)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DriveNotFound { keyword } => {
                format!("Navigator drive not found (looking for '{}')", keyword)
            }
            Self::FolderNotFound { path } => format!("Folder is missing: {}", path.display()),
            Self::FileIo { path, .. } if self.is_permission_denied() => {
                format!("Access denied: {}", path.display())
            }
            Self::FileIo { path, source } => {
                format!("Could not process {}: {}", path.display(), source)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Device => "Connect the navigator and make sure its volume is mounted",
            ErrorCategory::Filesystem if self.is_permission_denied() => {
                "Check that the file is not read-only or opened by another program"
            }
            ErrorCategory::Filesystem => "Check that the device is still connected and writable",
            ErrorCategory::Configuration => "Fix the configuration value named in the message",
            ErrorCategory::Internal => "Re-run with RUST_LOG=nav_updater=debug for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_is_detected() {
        let err = UpdateError::io(
            "/mnt/garmin/GPX/a.gpx",
            std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_permission_denied());
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(err.user_friendly_message().starts_with("Access denied"));
    }

    #[test]
    fn test_categories() {
        let drive = UpdateError::DriveNotFound {
            keyword: "Garmin".to_string(),
        };
        assert_eq!(drive.category(), ErrorCategory::Device);
        assert!(!drive.is_permission_denied());

        let config = UpdateError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }
}
