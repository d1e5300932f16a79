//! Application state shared by handlers.

use std::sync::Arc;

use uploader_core::Config;
use uploader_storage::UploadStore;

use crate::client::DataAcquisitionClient;
use crate::security::PermissionVerifier;

/// Collaborators behind trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UploadStore>,
    pub permissions: Arc<dyn PermissionVerifier>,
    pub das_client: Arc<dyn DataAcquisitionClient>,
}
