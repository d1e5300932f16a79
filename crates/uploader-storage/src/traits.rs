//! Upload store abstraction
//!
//! This module defines the [`UploadStore`] trait that storage backends
//! implement. The store receives the request's file part as a byte stream and
//! must consume it to completion without buffering the whole file in memory.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A single-pass stream of body chunks for one multipart part. Borrowed from
/// the request, so it cannot outlive the handler invocation.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Descriptor of a stored upload, returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Backend key identifying the stored object
    pub key: String,
    /// Number of bytes drained from the stream
    pub size_bytes: u64,
}

/// Upload store abstraction
///
/// Backends persist one file per call. The stream is forward-only and is read
/// exactly once; callers must not hand the same stream to two backends.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist a file for the given organization, draining `data` to
    /// completion. Returns the storage key and the number of bytes written.
    async fn store(
        &self,
        org_guid: Uuid,
        filename: &str,
        data: ByteStream<'_>,
    ) -> StorageResult<StoredUpload>;
}
