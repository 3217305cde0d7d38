//! Overlay - raster template text overlay
//!
//! This crate provides functionality for:
//! - Resolving TrueType fonts from well-known system locations
//! - Per-role text styles (size, color, font) with partial updates
//! - Per-anchor coordinates with geometry-derived defaults
//! - Rendering personalized front/back certificate pages onto raster templates
//!
//! # Example
//!
//! ```ignore
//! use overlay::{OverlayEngine, Template};
//!
//! let engine = OverlayEngine::new();
//! let front = Template::open("front.png")?;
//! let page = engine.render_front(&front, "Jane Doe", "042");
//! page.save("Jane Doe_front.png")?;
//! ```

mod coords;
mod engine;
mod font;
mod style;

pub use coords::{BackCoords, BackCoordsUpdate, FrontCoords, FrontCoordsUpdate};
pub use engine::{format_average, OverlayEngine, RecipientRecord, Template};
pub use font::{FontHandle, FontResolver};
pub use style::{Color, StyleEntry, StyleRegistry, StyleUpdate};

use thiserror::Error;

/// Errors that can occur during overlay rendering
///
/// Drawing itself is infallible once a template is decoded; font
/// resolution degrades to the built-in fallback instead of failing.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Failed to load template: {0}")]
    TemplateLoad(String),
}

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Logical text slot on a certificate page
///
/// Each role carries its own style and anchor. The set is closed: the
/// back page draws module text, the fixed total and the computed average,
/// the front page draws the recipient name and identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Name,
    Identifier,
    ModuleText,
    TotalHours,
    Average,
}

impl Role {
    /// All roles, in drawing order
    pub const ALL: [Role; 5] = [
        Role::Name,
        Role::Identifier,
        Role::ModuleText,
        Role::TotalHours,
        Role::Average,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Name => "name",
            Role::Identifier => "identifier",
            Role::ModuleText => "module_text",
            Role::TotalHours => "total_hours",
            Role::Average => "average",
        }
    }
}
