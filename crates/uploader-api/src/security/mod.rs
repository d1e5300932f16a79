//! Organization access checks.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use uploader_core::AppError;
use uuid::Uuid;

use crate::auth::Principal;

/// Decides whether a principal may act on a given organization.
#[async_trait]
pub trait PermissionVerifier: Send + Sync {
    async fn is_org_accessible(
        &self,
        org_guid: Uuid,
        principal: &Principal,
    ) -> Result<bool, AppError>;
}

#[derive(Debug, Deserialize)]
struct OrgEntry {
    guid: Uuid,
}

/// Verifier backed by the platform's user management service: the caller's
/// token is forwarded and the returned organization list is checked for
/// membership. The service, not this crate, owns the access decision.
pub struct OrgServiceVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl OrgServiceVerifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for permission checks")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PermissionVerifier for OrgServiceVerifier {
    async fn is_org_accessible(
        &self,
        org_guid: Uuid,
        principal: &Principal,
    ) -> Result<bool, AppError> {
        let response = self
            .client
            .get(format!("{}/rest/orgs", self.base_url))
            .header(AUTHORIZATION, principal.bearer_token())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Permission check failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "User management service returned {}",
                response.status()
            )));
        }

        let orgs: Vec<OrgEntry> = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid organization list: {}", e)))?;

        Ok(orgs.iter().any(|org| org.guid == org_guid))
    }
}
