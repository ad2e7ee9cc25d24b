//! Stillcut Core Library
//!
//! Error kinds, process configuration and the filename rules shared by the
//! storage, processing and API crates.

pub mod config;
pub mod error;
pub mod filename;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use filename::is_valid_filename;
