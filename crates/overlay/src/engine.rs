//! Front/back page rendering

use crate::coords::{BackCoords, BackCoordsUpdate, FrontCoords, FrontCoordsUpdate};
use crate::style::{StyleRegistry, StyleUpdate};
use crate::{OverlayError, Result, Role};
use image::RgbaImage;
use std::path::Path;

/// Number of module rows on the back page (fixed by domain rule)
const MODULE_COUNT: usize = 4;
/// Hour label per module; hours are constant, never read from the record
const MODULE_HOURS_TEXT: &str = "30 hours";
/// Total hours label, 4 x 30 by the fixed four-module rule
const TOTAL_HOURS_TEXT: &str = "120 hours";
/// Prefix drawn before the raw identifier value on the front page
const ID_PREFIX: &str = "Folio: ";

/// An immutable background raster, decoded once per run
///
/// Every render takes a fresh in-memory copy via [`Template::page`], so
/// the template itself is never mutated and sequential renders never see
/// a prior recipient's text.
#[derive(Debug, Clone)]
pub struct Template {
    image: RgbaImage,
}

impl Template {
    /// Decode a template from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(&path)
            .map_err(|e| {
                OverlayError::TemplateLoad(format!("{}: {e}", path.as_ref().display()))
            })?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Decode a template from an in-memory byte buffer
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)
            .map_err(|e| OverlayError::TemplateLoad(e.to_string()))?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Wrap an already-decoded raster
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// A fresh mutable copy to draw a single recipient's page on
    pub fn page(&self) -> RgbaImage {
        self.image.clone()
    }
}

/// One row of input data: one person's certificate contents
///
/// A score slot is `None` when the cell was empty. Missing and
/// non-numeric scores still appear on the rendered page but are excluded
/// from the average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientRecord {
    pub name: String,
    pub identifier: String,
    pub scores: [Option<String>; 4],
}

/// The overlay engine: styles and coordinates plus the two render entry
/// points
///
/// Configuration is shared across a whole run by intent; mutate it
/// between recipients only.
#[derive(Debug, Default)]
pub struct OverlayEngine {
    styles: StyleRegistry,
    front: FrontCoords,
    back: BackCoords,
}

impl OverlayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial style update for one role
    ///
    /// The role's font handle is re-resolved immediately, so the change
    /// affects all subsequent renders and never output already written.
    pub fn set_style(&mut self, role: Role, update: StyleUpdate) {
        self.styles.set(role, update);
    }

    /// Merge a partial update into the front-template coordinates
    pub fn set_front_coordinates(&mut self, update: FrontCoordsUpdate) {
        self.front.apply(update);
    }

    /// Merge a partial update into the back-template coordinates
    pub fn set_back_coordinates(&mut self, update: BackCoordsUpdate) {
        self.back.apply(update);
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn front_coords(&self) -> &FrontCoords {
        &self.front
    }

    pub fn back_coords(&self) -> &BackCoords {
        &self.back
    }

    /// Render the front page: name and identifier, horizontally centered
    /// on their anchors
    ///
    /// Unset anchors derive from this template's own width and height.
    /// The drawn left edge is `anchor_x - measured_width / 2`; the anchor
    /// y is the top of the run, not its vertical center.
    pub fn render_front(&self, template: &Template, name: &str, identifier: &str) -> RgbaImage {
        let mut page = template.page();
        let (width, height) = (template.width(), template.height());

        let (name_x, name_y) = self.front.name_anchor(width, height);
        self.draw_centered(&mut page, Role::Name, name, name_x, name_y);

        let id_text = format!("{ID_PREFIX}{identifier}");
        let (id_x, id_y) = self.front.id_anchor(width, height);
        self.draw_centered(&mut page, Role::Identifier, &id_text, id_x, id_y);

        page
    }

    /// Render the back page: four module rows, the fixed total, and the
    /// computed average
    pub fn render_back(&self, template: &Template, record: &RecipientRecord) -> RgbaImage {
        let mut page = template.page();

        let module_style = self.styles.get(Role::ModuleText);
        let module_font = self.styles.font(Role::ModuleText);

        let mut parsed = Vec::with_capacity(MODULE_COUNT);
        for row in 0..MODULE_COUNT {
            let (hx, hy) = self.back.module_anchor(row);
            module_font.draw(&mut page, hx, hy, MODULE_HOURS_TEXT, module_style.color);

            // A missing score is still drawn, as "0"
            let raw = record.scores[row].as_deref();
            let (sx, sy) = self.back.score_anchor(row);
            module_font.draw(&mut page, sx, sy, raw.unwrap_or("0"), module_style.color);

            // Only values that actually parse count toward the average
            if let Some(value) = raw.and_then(|s| s.trim().parse::<f64>().ok()) {
                parsed.push(value);
            }
        }

        let total_style = self.styles.get(Role::TotalHours);
        self.styles.font(Role::TotalHours).draw(
            &mut page,
            self.back.total_x,
            self.back.total_y,
            TOTAL_HOURS_TEXT,
            total_style.color,
        );

        let average_text = format!("Average: {}", format_average(&parsed));
        let average_style = self.styles.get(Role::Average);
        self.styles.font(Role::Average).draw(
            &mut page,
            self.back.average_x,
            self.back.average_y,
            &average_text,
            average_style.color,
        );

        page
    }

    fn draw_centered(&self, page: &mut RgbaImage, role: Role, text: &str, x: i64, y: i64) {
        let style = self.styles.get(role);
        let font = self.styles.font(role);
        let width = font.measure(text) as i64;
        font.draw(page, x - width / 2, y, text, style.color);
    }
}

/// Mean of the parsed scores, formatted to two decimals under round-half-up
///
/// An empty slice formats as "0.00".
pub fn format_average(scores: &[f64]) -> String {
    if scores.is_empty() {
        return "0.00".to_string();
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    format!("{:.2}", (mean * 100.0).round() / 100.0)
}
