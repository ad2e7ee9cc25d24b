//! Stillcut Storage Library
//!
//! Blob storage for uploaded JPEGs, keyed by validated filename.
//!
//! # Key format
//!
//! A key is a bare filename token (see `stillcut_core::is_valid_filename`).
//! The local backend maps it to `{storage_dir}/{key}.jpg` in one flat
//! directory. Writes create-or-overwrite; nothing is ever deleted.

pub mod local;
pub mod traits;

pub use local::LocalBlobStore;
pub use traits::{BlobStore, StorageError, StorageResult, StoredBlob};
