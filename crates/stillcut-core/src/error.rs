//! Error types module
//!
//! Every failure a pipeline can produce is one of the `AppError` kinds below.
//! The HTTP layer turns them into a status code and a plain-text message via
//! `ErrorMetadata`; nothing is retried.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client mistakes (bad filename, bad token, bad parameter)
    Debug,
    /// Suspicious but recoverable conditions
    Warn,
    /// Server-side failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_PARAMETER")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid or missing filename")]
    InvalidFilename,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found: {0}")]
    NotFound(String),

    /// A present-but-unusable query parameter; `field` names it.
    #[error("Invalid {field} parameter: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// Uploaded bytes are not a decodable JPEG.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// The multipart form or its `image` field could not be read.
    #[error("Unreadable upload: {0}")]
    UnreadableUpload(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Stored bytes failed to decode. Stored data is trusted, so this is a server error.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidFilename => "InvalidFilename",
            AppError::Unauthorized => "Unauthorized",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidParameter { .. } => "InvalidParameter",
            AppError::InvalidUpload(_) => "InvalidUpload",
            AppError::UnreadableUpload(_) => "UnreadableUpload",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Decode(_) => "Decode",
            AppError::Encode(_) => "Encode",
            AppError::Io(_) => "Io",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// (http_status, error_code, log_level) for each variant.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidFilename => (400, "INVALID_FILENAME", LogLevel::Debug),
        AppError::Unauthorized => (401, "UNAUTHORIZED", LogLevel::Warn),
        AppError::MethodNotAllowed => (405, "METHOD_NOT_ALLOWED", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::InvalidParameter { .. } => (400, "INVALID_PARAMETER", LogLevel::Debug),
        AppError::InvalidUpload(_) => (400, "INVALID_UPLOAD", LogLevel::Debug),
        AppError::UnreadableUpload(_) => (400, "UNREADABLE_UPLOAD", LogLevel::Debug),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", LogLevel::Debug),
        AppError::Decode(_) => (500, "DECODE_ERROR", LogLevel::Error),
        AppError::Encode(_) => (500, "ENCODE_ERROR", LogLevel::Error),
        AppError::Io(_) => (500, "IO_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFilename => "Invalid or missing filename".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::MethodNotAllowed => "Only POST requests are allowed".to_string(),
            AppError::NotFound(_) => "File not found".to_string(),
            AppError::InvalidParameter { field, .. } => format!("Invalid {} parameter", field),
            AppError::InvalidUpload(_) => "Uploaded file is not a valid JPEG".to_string(),
            AppError::UnreadableUpload(_) => "Error reading uploaded file".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Decode(_) => "Error decoding the image".to_string(),
            AppError::Encode(_) => "Error encoding the cropped image".to_string(),
            // Server-side details stay in the logs
            AppError::Io(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
