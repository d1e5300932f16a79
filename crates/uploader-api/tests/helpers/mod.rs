//! Test helpers: build AppState and router with in-memory collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use tempfile::TempDir;
use uploader_api::auth::Principal;
use uploader_api::client::DataAcquisitionClient;
use uploader_api::security::PermissionVerifier;
use uploader_api::setup::routes::setup_routes;
use uploader_api::state::AppState;
use uploader_core::{AppError, Config, UploadCompleted};
use uploader_storage::LocalUploadStore;
use uuid::Uuid;

pub const TEST_TOKEN: &str = "test-token";

/// Permission verifier backed by a fixed allowlist of org GUIDs.
pub struct AllowListVerifier {
    allowed: Vec<Uuid>,
}

#[async_trait]
impl PermissionVerifier for AllowListVerifier {
    async fn is_org_accessible(
        &self,
        org_guid: Uuid,
        _principal: &Principal,
    ) -> Result<bool, AppError> {
        Ok(self.allowed.contains(&org_guid))
    }
}

/// Callback client that records every delivery instead of making HTTP calls.
pub struct RecordingDasClient {
    pub sent: Mutex<Vec<(UploadCompleted, String)>>,
    fail: bool,
}

impl RecordingDasClient {
    pub fn new(fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail,
        }
    }

    pub fn deliveries(&self) -> Vec<(UploadCompleted, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataAcquisitionClient for RecordingDasClient {
    async fn upload_completed(
        &self,
        message: &UploadCompleted,
        token: &str,
    ) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.clone(), token.to_string()));
        if self.fail {
            Err(AppError::Notification(
                "Data acquisition service returned 500".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Test application: server plus handles on the fakes and the storage dir.
pub struct TestApp {
    pub server: TestServer,
    pub das: Arc<RecordingDasClient>,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently in the upload store.
    pub fn stored_file_count(&self) -> usize {
        walk_files(self.storage_dir.path())
    }
}

fn walk_files(dir: &std::path::Path) -> usize {
    let mut count = 0;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                count += walk_files(&path);
            } else {
                count += 1;
            }
        }
    }
    count
}

fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        das_url: "http://localhost:8081".to_string(),
        user_management_url: "http://localhost:8082".to_string(),
        storage_path: "/tmp/uploader-test".to_string(),
        max_upload_size_bytes: 16 * 1024 * 1024,
        http_timeout_seconds: 5,
    }
}

/// Setup a test app with a tempdir-backed store, an org allowlist, and a
/// recording callback client.
pub async fn setup_test_app(allowed_orgs: Vec<Uuid>, das_fails: bool) -> TestApp {
    let storage_dir = TempDir::new().expect("create temp storage dir");
    let store = LocalUploadStore::new(storage_dir.path())
        .await
        .expect("create local store");

    let das = Arc::new(RecordingDasClient::new(das_fails));
    let config = test_config();

    let state = Arc::new(AppState {
        config: config.clone(),
        store: Arc::new(store),
        permissions: Arc::new(AllowListVerifier {
            allowed: allowed_orgs,
        }),
        das_client: das.clone(),
    });

    let router = setup_routes(&config, state);
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        das,
        storage_dir,
    }
}
