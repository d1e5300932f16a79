//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Uploader API",
        version = "0.1.0",
        description = "Streams multipart file uploads to storage and notifies the data acquisition service on completion."
    ),
    paths(handlers::upload::upload, handlers::health::health),
    components(schemas(uploader_core::UploadCompleted, error::ErrorResponse)),
    tags(
        (name = "upload", description = "Streamed multipart upload"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
