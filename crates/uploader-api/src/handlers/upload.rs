//! Streamed multipart upload handler.
//!
//! The request body is consumed as a lazy, forward-only sequence of parts:
//! the file part is handed to the upload store as a byte stream without ever
//! being buffered whole, and form fields become metadata properties on the
//! completion message.

use std::sync::Arc;

use axum::{
    extract::multipart::{Multipart, MultipartError, MultipartRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use uploader_core::{AppError, UploadCompleted};
use uploader_storage::{ByteStream, UploadStore};
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Upload a file as multipart content together with metadata.
///
/// Order matters: the multipart precondition and the organization access check
/// both run before the first byte of the body is read, so a denied caller
/// never triggers a partial upload.
#[utoipa::path(
    post,
    path = "/rest/upload/{org_guid}",
    tag = "upload",
    params(
        ("org_guid" = Uuid, Path, description = "Organization GUID the upload belongs to")
    ),
    responses(
        (status = 201, description = "Upload stored and downstream service notified", body = UploadCompleted),
        (status = 400, description = "No multipart content or malformed multipart body", body = ErrorResponse),
        (status = 401, description = "Missing or malformed authorization header", body = ErrorResponse),
        (status = 403, description = "Caller has no access to the organization", body = ErrorResponse),
        (status = 500, description = "Storage or downstream notification failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, principal, multipart), fields(org_guid = %org_guid))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(org_guid): Path<Uuid>,
    principal: Principal,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadCompleted>), HttpAppError> {
    let multipart = multipart?;

    if !state
        .permissions
        .is_org_accessible(org_guid, &principal)
        .await?
    {
        return Err(AppError::AccessDenied(
            "You do not have access to the requested organization".to_string(),
        )
        .into());
    }

    let message = process_upload(multipart, state.store.as_ref(), org_guid).await?;

    let token = principal.bearer_token();
    if let Err(err) = state.das_client.upload_completed(&message, &token).await {
        // The file is already on disk; keep it and surface the source so
        // operators can reconcile the unacknowledged upload.
        tracing::warn!(
            source = ?message.source,
            "Upload stored but downstream notification failed"
        );
        return Err(err.into());
    }

    Ok((StatusCode::CREATED, Json(message)))
}

/// Single pass over the multipart parts. A part carrying a filename is the
/// file and goes to the store; everything else is a form field read as UTF-8.
async fn process_upload(
    mut multipart: Multipart,
    store: &dyn UploadStore,
    org_guid: Uuid,
) -> Result<UploadCompleted, HttpAppError> {
    let mut builder = UploadCompleted::builder();

    tracing::info!("Upload started");
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if let Some(filename) = field.file_name().map(ToString::to_string) {
            let data: ByteStream<'_> = Box::pin(field.map_err(std::io::Error::other));
            let stored = store.store(org_guid, &filename, data).await?;
            tracing::info!(
                filename = %filename,
                size_bytes = stored.size_bytes,
                "File part stored"
            );
            builder = builder.source(filename);
        } else {
            let name = field.name().unwrap_or_default().to_string();
            tracing::info!(field_name = %name, "Form field");
            let value = field.text().await.map_err(malformed)?;
            builder = builder.property(name, value);
        }
    }
    tracing::info!("Upload completed");

    Ok(builder.build())
}

fn malformed(err: MultipartError) -> HttpAppError {
    HttpAppError(AppError::InvalidRequest(format!(
        "Malformed multipart body: {}",
        err
    )))
}
