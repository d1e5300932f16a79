//! Upload endpoint integration tests.
//!
//! Run with: `cargo test -p uploader-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, TEST_TOKEN};
use uploader_core::UploadCompleted;
use uuid::Uuid;

fn auth_header() -> String {
    format!("bearer {}", TEST_TOKEN)
}

#[tokio::test]
async fn test_upload_file_with_metadata_fields() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    let form = MultipartForm::new().add_text("owner", "alice").add_part(
        "file",
        Part::bytes(b"a,b,c\n1,2,3\n".as_slice())
            .file_name("data.csv")
            .mime_type("text/csv"),
    );

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 201);

    let message: UploadCompleted = response.json();
    assert_eq!(message.source.as_deref(), Some("data.csv"));
    assert_eq!(message.properties.len(), 1);
    assert_eq!(message.properties["owner"], "alice");

    // File landed on disk under the org directory
    let stored = std::fs::read(
        app.storage_dir
            .path()
            .join(org.to_string())
            .join("data.csv"),
    )
    .expect("uploaded file on disk");
    assert_eq!(stored, b"a,b,c\n1,2,3\n");

    // The callback received the caller's token and the same message
    let deliveries = app.das.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].0, message);
    assert_eq!(deliveries[0].1, format!("bearer {}", TEST_TOKEN));
}

#[tokio::test]
async fn test_duplicate_field_last_value_wins() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    let form = MultipartForm::new()
        .add_text("tag", "a")
        .add_text("tag", "b");

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 201);
    let message: UploadCompleted = response.json();
    assert_eq!(message.properties["tag"], "b");
}

#[tokio::test]
async fn test_upload_without_file_part_has_null_source() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    let form = MultipartForm::new()
        .add_text("owner", "alice")
        .add_text("category", "finance");

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 201);
    let message: UploadCompleted = response.json();
    assert!(message.source.is_none());
    assert_eq!(message.properties.len(), 2);

    // Nothing stored, but the callback still fired
    assert_eq!(app.stored_file_count(), 0);
    assert_eq!(app.das.deliveries().len(), 1);
}

#[tokio::test]
async fn test_access_denied_performs_no_io() {
    let app = setup_test_app(vec![], false).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"secret".as_slice()).file_name("data.csv"),
    );

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", Uuid::new_v4()))
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.das.deliveries().is_empty());
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    let form = MultipartForm::new().add_text("owner", "alice");

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(app.das.deliveries().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .text("not a multipart body")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.das.deliveries().is_empty());
}

#[tokio::test]
async fn test_malformed_multipart_body_is_rejected() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], false).await;

    // Declares a multipart boundary but truncates the body mid-part
    let broken_body = "--xyz\r\nContent-Disposition: form-data; name=\"owner\"\r\n\r\nali";

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .add_header("Content-Type", "multipart/form-data; boundary=xyz")
        .bytes(broken_body.as_bytes().to_vec().into())
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.das.deliveries().is_empty());
}

#[tokio::test]
async fn test_invalid_org_guid_is_rejected() {
    let app = setup_test_app(vec![], false).await;

    let form = MultipartForm::new().add_text("owner", "alice");

    let response = app
        .client()
        .post("/rest/upload/not-a-uuid")
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_notification_failure_fails_the_request() {
    let org = Uuid::new_v4();
    let app = setup_test_app(vec![org], true).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"payload".as_slice()).file_name("data.csv"),
    );

    let response = app
        .client()
        .post(&format!("/rest/upload/{}", org))
        .add_header("Authorization", auth_header())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 500);
    // The stored file is kept: durable but unacknowledged
    assert_eq!(app.stored_file_count(), 1);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app(vec![], false).await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
}
