//! Certgen - batch certificate generation from a CSV roster
//!
//! This crate provides functionality for:
//! - Loading and validating a recipient roster from CSV
//! - Driving the overlay and compose crates, one recipient at a time
//! - Output layout, name sanitization, and zip bundling of documents
//! - Optional JSON render profiles overriding styles and coordinates

mod generator;
mod output;
mod profile;
mod roster;

pub use generator::{BatchReport, Generator, RowFailure};
pub use output::{archive_documents, sanitize_name, OutputLayout};
pub use profile::{RenderProfile, StyleOverrides};
pub use roster::Roster;

use thiserror::Error;

/// Errors that can occur while driving a batch run
#[derive(Debug, Error)]
pub enum CertgenError {
    #[error("Roster is missing required columns: {0}")]
    MissingColumns(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Render profile error: {0}")]
    Profile(#[from] serde_json::Error),

    #[error(transparent)]
    Overlay(#[from] overlay::OverlayError),

    #[error(transparent)]
    Compose(#[from] compose::ComposeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, CertgenError>;
