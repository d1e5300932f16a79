//! Uploader API Library
//!
//! This crate provides the HTTP handler for streamed multipart uploads, the
//! outbound data-acquisition callback client, and application setup.

// Module declarations
mod api_doc;
mod telemetry;

// Public modules
pub mod auth;
pub mod client;
pub mod error;
pub mod handlers;
pub mod security;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
