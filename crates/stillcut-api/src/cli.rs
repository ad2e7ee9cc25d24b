//! Command-line and environment configuration

use clap::Parser;
use std::path::PathBuf;
use stillcut_core::config::{
    Config, DEFAULT_BIND_IP, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_STORAGE_DIR,
};

#[derive(Debug, Parser)]
#[command(name = "stillcut-api", about = "Store JPEGs and serve cropped, scaled, labelled copies")]
pub struct Args {
    /// Directory to save the images
    #[arg(long, env = "STORAGE_DIR", default_value = DEFAULT_STORAGE_DIR)]
    pub dir: PathBuf,

    /// Max image size in bytes; larger uploads are truncated
    #[arg(long = "max-size", env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_size: u64,

    /// Bearer token for authentication (required)
    #[arg(long, env = "BEARER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// IP address to listen on
    #[arg(long, env = "BIND_IP", default_value = DEFAULT_BIND_IP)]
    pub ip: String,
}

impl Args {
    /// A missing token becomes empty here and is refused by `Config::validate`.
    pub fn into_config(self) -> Config {
        Config {
            bind_ip: self.ip,
            port: self.port,
            storage_dir: self.dir,
            max_upload_bytes: self.max_size,
            bearer_token: self.token.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_config() {
        let args = Args::try_parse_from([
            "stillcut-api",
            "--dir",
            "/srv/images",
            "--max-size",
            "2048",
            "--token",
            "s3cret",
            "--port",
            "9000",
            "--ip",
            "127.0.0.1",
        ])
        .unwrap();
        let config = args.into_config();

        assert_eq!(config.storage_dir, PathBuf::from("/srv/images"));
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.bearer_token, "s3cret");
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = Args {
            dir: PathBuf::from("./"),
            max_size: DEFAULT_MAX_UPLOAD_BYTES,
            token: None,
            port: DEFAULT_PORT,
            ip: DEFAULT_BIND_IP.to_string(),
        }
        .into_config();
        assert!(config.validate().is_err());
    }
}
