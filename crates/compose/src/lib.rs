//! Compose - two-page PDF assembly from rendered raster pages
//!
//! This crate provides functionality for:
//! - Embedding JPEG and PNG rasters as PDF image XObjects
//! - Building a fresh two-page A4 document, one full-bleed raster per page
//! - Aspect-preserving, centered placement of each raster on its page

mod composer;
mod image;

pub use composer::{compose, compose_to_bytes, A4_HEIGHT_PT, A4_WIDTH_PT};
pub use image::{detect_format, PageImage, RasterFormat};

use thiserror::Error;

/// Errors that can occur during document composition
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Failed to read page raster: {0}")]
    PageLoad(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<::image::ImageError> for ComposeError {
    fn from(err: ::image::ImageError) -> Self {
        ComposeError::ImageError(err.to_string())
    }
}

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, ComposeError>;
