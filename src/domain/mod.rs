pub mod error;
pub mod model;
pub mod sanitize;

pub use error::{AppError, FetchFailure};
pub use model::{BinaryOutcome, DownloadMode, DownloadOutcome, VideoKey};
pub use sanitize::{sanitize, SanitizedMetadata};
