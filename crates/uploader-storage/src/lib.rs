//! Uploader Storage Library
//!
//! This crate provides the upload-store abstraction and the local filesystem
//! backend. Uploaded files are written under `{storage_path}/{org_guid}/{filename}`;
//! filenames must not contain path separators or `..`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalUploadStore;
pub use traits::{ByteStream, StorageError, StorageResult, StoredUpload, UploadStore};
