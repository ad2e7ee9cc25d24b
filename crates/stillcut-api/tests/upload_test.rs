//! `/save` integration tests.
//!
//! Run with: `cargo test -p stillcut-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::create_test_jpeg;
use helpers::{image_form, setup_test_app, setup_test_app_with_max, TEST_TOKEN};

#[tokio::test]
async fn test_upload_stores_file() {
    let app = setup_test_app().await;
    let jpeg = create_test_jpeg(100, 100);

    let response = app.upload("test", jpeg.clone()).await;

    assert_eq!(response.status_code(), 200);
    let stored = std::fs::read(app.stored_path("test")).unwrap();
    assert_eq!(stored, jpeg);
}

#[tokio::test]
async fn test_upload_overwrites() {
    let app = setup_test_app().await;
    app.upload("same", create_test_jpeg(10, 10)).await;
    let second = create_test_jpeg(20, 20);

    let response = app.upload("same", second.clone()).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(std::fs::read(app.stored_path("same")).unwrap(), second);
}

#[tokio::test]
async fn test_upload_wrong_token_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/save")
        .add_query_param("filename", "test")
        .add_header("Authorization", "Bearer not-the-token")
        .multipart(image_form(create_test_jpeg(10, 10)))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.text(), "Unauthorized\n");
    assert!(!app.stored_path("test").exists());
}

#[tokio::test]
async fn test_upload_missing_auth_checked_before_filename() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/save")
        .add_query_param("filename", "../../etc/passwd")
        .multipart(image_form(create_test_jpeg(10, 10)))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_upload_invalid_filename() {
    let app = setup_test_app().await;

    for filename in ["", "a.b", "../x", "has space"] {
        let response = app.upload(filename, create_test_jpeg(10, 10)).await;
        assert_eq!(response.status_code(), 400, "filename {:?}", filename);
        assert_eq!(response.text(), "Invalid or missing filename\n");
    }
}

#[tokio::test]
async fn test_upload_missing_filename() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/save")
        .add_header("Authorization", format!("Bearer {}", TEST_TOKEN))
        .multipart(image_form(create_test_jpeg(10, 10)))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_non_jpeg_rejected() {
    let app = setup_test_app().await;

    let response = app.upload("notjpeg", b"GIF89a not really".to_vec()).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Uploaded file is not a valid JPEG\n");
    assert!(!app.stored_path("notjpeg").exists());
}

#[tokio::test]
async fn test_upload_missing_image_field() {
    let app = setup_test_app().await;
    let form = MultipartForm::new().add_part(
        "photo",
        Part::bytes(create_test_jpeg(10, 10)).file_name("x.jpg"),
    );

    let response = app
        .client()
        .post("/save")
        .add_query_param("filename", "test")
        .add_header("Authorization", format!("Bearer {}", TEST_TOKEN))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Error reading uploaded file\n");
}

#[tokio::test]
async fn test_upload_truncated_below_header_is_rejected() {
    let app = setup_test_app_with_max(10).await;

    let response = app.upload("tiny", create_test_jpeg(64, 64)).await;

    assert_eq!(response.status_code(), 400);
    assert!(!app.stored_path("tiny").exists());
}

#[tokio::test]
async fn test_upload_trailing_bytes_past_limit_dropped() {
    let jpeg = create_test_jpeg(32, 32);
    let app = setup_test_app_with_max(jpeg.len() as u64).await;
    let mut padded = jpeg.clone();
    padded.extend_from_slice(&[0u8; 4096]);

    let response = app.upload("padded", padded).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(std::fs::read(app.stored_path("padded")).unwrap(), jpeg);
}

#[tokio::test]
async fn test_save_rejects_other_methods() {
    let app = setup_test_app().await;

    let response = app.client().get("/save").await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(response.text(), "Only POST requests are allowed\n");

    let response = app.client().put("/save").await;
    assert_eq!(response.status_code(), 405);
}
