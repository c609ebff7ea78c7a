pub mod backup;
pub mod cleaner;
pub mod locator;
pub mod sync;
pub mod transfer;
pub mod updater;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{FileTally, FolderOutcome, FolderReport, RunReport, VolumeInfo};
pub use crate::domain::ports::{Reporter, VolumeSource};
pub use crate::utils::error::Result;
