pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{ConsoleReporter, SystemVolumes};
pub use crate::config::{CleanRule, ManagedFolder, UpdaterConfig};
pub use crate::core::updater::Updater;
pub use crate::domain::model::{FileTally, FolderOutcome, FolderReport, RunReport, VolumeInfo};
pub use crate::domain::ports::{Reporter, VolumeSource};
pub use crate::utils::error::{Result, UpdateError};
