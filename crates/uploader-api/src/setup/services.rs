//! Collaborator wiring.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use uploader_core::Config;
use uploader_storage::LocalUploadStore;

use crate::client::HttpDataAcquisitionClient;
use crate::security::OrgServiceVerifier;
use crate::state::AppState;

/// Build the production collaborators and assemble the application state.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let timeout = Duration::from_secs(config.http_timeout_seconds);

    let store = LocalUploadStore::new(&config.storage_path)
        .await
        .with_context(|| format!("Failed to initialize upload store at {}", config.storage_path))?;

    let permissions = OrgServiceVerifier::new(&config.user_management_url, timeout)?;
    let das_client = HttpDataAcquisitionClient::new(&config.das_url, timeout)?;

    tracing::info!(
        storage_path = %config.storage_path,
        das_url = %config.das_url,
        user_management_url = %config.user_management_url,
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        store: Arc::new(store),
        permissions: Arc::new(permissions),
        das_client: Arc::new(das_client),
    }))
}
