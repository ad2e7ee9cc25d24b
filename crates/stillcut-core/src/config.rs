//! Configuration module
//!
//! Process-wide settings resolved once at startup. The value is handed to each
//! pipeline when it is constructed; nothing reads configuration at request time.

use std::path::PathBuf;

pub const DEFAULT_BIND_IP: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORAGE_DIR: &str = "./";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1_000_000;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_ip: String,
    pub port: u16,
    /// Flat directory holding `<filename>.jpg` blobs
    pub storage_dir: PathBuf,
    /// Uploads are truncated (not rejected) past this many bytes
    pub max_upload_bytes: u64,
    /// Shared secret expected as `Authorization: Bearer <token>` on writes
    pub bearer_token: String,
}

impl Config {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bind_ip: DEFAULT_BIND_IP.to_string(),
            port: DEFAULT_PORT,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            bearer_token: bearer_token.into(),
        }
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_ip, self.port)
    }

    /// Fail fast on settings the server cannot run without.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bearer_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Bearer token must be provided"));
        }

        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("Maximum upload size cannot be 0"));
        }

        if self.bind_ip.trim().is_empty() {
            return Err(anyhow::anyhow!("Bind address cannot be empty"));
        }

        Ok(())
    }
}
