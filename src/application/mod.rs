pub mod dispatcher;
pub mod download_coordinator;
pub mod job;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::{Command, Dispatcher, KeyCombos};
pub use download_coordinator::DownloadCoordinator;
pub use job::Notifier;
pub use storage::{DiskSaver, HttpDownloader};
