//! Test helpers: build the real router over a temp-dir store.
//!
//! Run from workspace root: `cargo test -p stillcut-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use stillcut_api::setup::build_app;
use stillcut_core::Config;
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "test-token";

/// Test application: server plus the directory backing its store.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn stored_path(&self, filename: &str) -> std::path::PathBuf {
        self.temp_dir.path().join(format!("{}.jpg", filename))
    }

    /// Authenticated upload of `data` as the `image` field.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> TestResponse {
        self.server
            .post("/save")
            .add_query_param("filename", filename)
            .add_header("Authorization", format!("Bearer {}", TEST_TOKEN))
            .multipart(image_form(data))
            .await
    }
}

pub fn image_form(data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(data)
            .file_name("upload.jpg")
            .mime_type("image/jpeg"),
    )
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_max(stillcut_core::config::DEFAULT_MAX_UPLOAD_BYTES).await
}

pub async fn setup_test_app_with_max(max_upload_bytes: u64) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::new(TEST_TOKEN)
        .with_storage_dir(temp_dir.path())
        .with_max_upload_bytes(max_upload_bytes);

    let (_state, router) = build_app(config).await.expect("Failed to build app");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, temp_dir }
}
