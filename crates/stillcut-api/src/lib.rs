//! Stillcut API Library
//!
//! HTTP boundary, the upload and render pipelines, and application setup.

pub mod auth;
pub mod cli;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;
pub mod utils;

pub use error::HttpAppError;
pub use services::{RenderPipeline, UploadPipeline};
