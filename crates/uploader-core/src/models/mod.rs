//! Domain models

mod upload;

pub use upload::{UploadCompleted, UploadCompletedBuilder};
