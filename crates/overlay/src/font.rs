//! Font resolution and glyph rasterization

use crate::style::Color;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::RgbaImage;
use std::path::PathBuf;

/// Advance width of the built-in fallback glyphs, in pixels
const FALLBACK_ADVANCE: u32 = 8;

/// Locates TrueType fonts across well-known per-platform directories.
///
/// Resolution never fails: when no candidate file loads, the built-in
/// bitmap fallback is returned and a warning is logged. A missing font
/// degrades rendering quality, not correctness.
#[derive(Debug, Clone, Default)]
pub struct FontResolver;

impl FontResolver {
    pub fn new() -> Self {
        Self
    }

    /// Candidate locations for a font name, tried in order
    fn candidates(font_name: &str) -> Vec<PathBuf> {
        vec![
            PathBuf::from("/System/Library/Fonts").join(font_name),
            PathBuf::from("/usr/share/fonts/truetype/dejavu").join(font_name),
            PathBuf::from("C:/Windows/Fonts").join(font_name),
            PathBuf::from(font_name),
        ]
    }

    /// Resolve a font by file name at the requested point size
    ///
    /// Returns the first candidate that reads and parses as a TrueType
    /// font, or the built-in fallback when none do.
    pub fn resolve(&self, font_name: &str, size: f32) -> FontHandle {
        for path in Self::candidates(font_name) {
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            match FontVec::try_from_vec(data) {
                Ok(font) => {
                    return FontHandle {
                        name: font_name.to_string(),
                        size,
                        face: Face::Outline(Box::new(font)),
                    };
                }
                Err(e) => {
                    log::debug!("candidate {} is not a usable font: {e}", path.display());
                }
            }
        }

        log::warn!("could not load font {font_name}, using built-in fallback");
        FontHandle {
            name: font_name.to_string(),
            size,
            face: Face::Bitmap,
        }
    }
}

#[derive(Debug)]
enum Face {
    /// A parsed TrueType font, scaled to the handle's size at draw time
    Outline(Box<FontVec>),
    /// Built-in 8x8 bitmap glyphs, fixed size
    Bitmap,
}

/// A font resolved at a specific size, ready for measurement and drawing
#[derive(Debug)]
pub struct FontHandle {
    name: String,
    size: f32,
    face: Face,
}

impl FontHandle {
    /// The font file name this handle was resolved from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point size the handle was resolved at
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Whether resolution fell back to the built-in glyph set
    pub fn is_fallback(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    fn px_scale(font: &FontVec, size: f32) -> PxScale {
        font.pt_to_px_scale(size).unwrap_or(PxScale::from(size))
    }

    /// Pixel width of a glyph run
    ///
    /// Uses the same face and size that [`FontHandle::draw`] uses, so a
    /// measured width is exact for that specific string.
    pub fn measure(&self, text: &str) -> u32 {
        match &self.face {
            Face::Outline(font) => {
                let scaled = font.as_scaled(Self::px_scale(font, self.size));
                let mut width = 0.0f32;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width.round().max(0.0) as u32
            }
            Face::Bitmap => text.chars().count() as u32 * FALLBACK_ADVANCE,
        }
    }

    /// Draw a glyph run onto the canvas
    ///
    /// `x`,`y` is the top-left of the run: the baseline sits at
    /// `y + ascent`. Glyph coverage is alpha-blended into existing pixels.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Color) {
        match &self.face {
            Face::Outline(font) => {
                let scale = Self::px_scale(font, self.size);
                let scaled = font.as_scaled(scale);
                let baseline = y as f32 + scaled.ascent();
                let mut caret = x as f32;
                let mut prev: Option<GlyphId> = None;

                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(scale, point(caret, baseline));
                    caret += scaled.h_advance(id);
                    prev = Some(id);

                    if let Some(outline) = font.outline_glyph(glyph) {
                        let bounds = outline.px_bounds();
                        outline.draw(|gx, gy, coverage| {
                            let px = bounds.min.x as i64 + gx as i64;
                            let py = bounds.min.y as i64 + gy as i64;
                            blend_pixel(canvas, px, py, color, coverage);
                        });
                    }
                }
            }
            Face::Bitmap => {
                let mut caret = x;
                for ch in text.chars() {
                    draw_bitmap_glyph(canvas, caret, y, ch, color);
                    caret += FALLBACK_ADVANCE as i64;
                }
            }
        }
    }
}

/// Blend one pixel of glyph coverage into the canvas, clipping at the edges
fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    dst[0] = (color.r as f32 * a + dst[0] as f32 * (1.0 - a)).round() as u8;
    dst[1] = (color.g as f32 * a + dst[1] as f32 * (1.0 - a)).round() as u8;
    dst[2] = (color.b as f32 * a + dst[2] as f32 * (1.0 - a)).round() as u8;
    dst[3] = dst[3].max((a * 255.0) as u8);
}

fn draw_bitmap_glyph(canvas: &mut RgbaImage, x: i64, y: i64, ch: char, color: Color) {
    let Some(rows) = fallback_glyph(ch) else {
        return;
    };
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..8u32 {
            if bits >> col & 1 == 1 {
                blend_pixel(canvas, x + col as i64, y + row as i64, color, 1.0);
            }
        }
    }
}

/// Bitmap rows for a printable ASCII character, bit 0 = leftmost pixel
fn fallback_glyph(ch: char) -> Option<&'static [u8; 8]> {
    let code = ch as u32;
    if !(0x20..=0x7E).contains(&code) {
        return None;
    }
    Some(&FALLBACK_GLYPHS[(code - 0x20) as usize])
}

/// 8x8 glyphs for ASCII 0x20..=0x7E (public domain font8x8 set)
#[rustfmt::skip]
const FALLBACK_GLYPHS: [[u8; 8]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x18, 0x3C, 0x3C, 0x18, 0x18, 0x00, 0x18, 0x00], // !
    [0x36, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x36, 0x36, 0x7F, 0x36, 0x7F, 0x36, 0x36, 0x00], // #
    [0x0C, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x0C, 0x00], // $
    [0x00, 0x63, 0x33, 0x18, 0x0C, 0x66, 0x63, 0x00], // %
    [0x1C, 0x36, 0x1C, 0x6E, 0x3B, 0x33, 0x6E, 0x00], // &
    [0x06, 0x06, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00], // '
    [0x18, 0x0C, 0x06, 0x06, 0x06, 0x0C, 0x18, 0x00], // (
    [0x06, 0x0C, 0x18, 0x18, 0x18, 0x0C, 0x06, 0x00], // )
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00], // *
    [0x00, 0x0C, 0x0C, 0x3F, 0x0C, 0x0C, 0x00, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ,
    [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00], // .
    [0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01, 0x00], // /
    [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00], // 0
    [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00], // 1
    [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00], // 2
    [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00], // 3
    [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00], // 4
    [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00], // 5
    [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00], // 6
    [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00], // 7
    [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00], // 8
    [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00], // 9
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ;
    [0x18, 0x0C, 0x06, 0x03, 0x06, 0x0C, 0x18, 0x00], // <
    [0x00, 0x00, 0x3F, 0x00, 0x00, 0x3F, 0x00, 0x00], // =
    [0x06, 0x0C, 0x18, 0x30, 0x18, 0x0C, 0x06, 0x00], // >
    [0x1E, 0x33, 0x30, 0x18, 0x0C, 0x00, 0x0C, 0x00], // ?
    [0x3E, 0x63, 0x7B, 0x7B, 0x7B, 0x03, 0x1E, 0x00], // @
    [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00], // A
    [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00], // B
    [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00], // C
    [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00], // D
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00], // E
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00], // F
    [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00], // G
    [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00], // H
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // I
    [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00], // J
    [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00], // K
    [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00], // L
    [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00], // M
    [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00], // N
    [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00], // O
    [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00], // P
    [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00], // Q
    [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00], // R
    [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00], // S
    [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // T
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00], // U
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // V
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00], // W
    [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00], // X
    [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00], // Y
    [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00], // Z
    [0x1E, 0x06, 0x06, 0x06, 0x06, 0x06, 0x1E, 0x00], // [
    [0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00], // backslash
    [0x1E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x1E, 0x00], // ]
    [0x08, 0x1C, 0x36, 0x63, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF], // _
    [0x0C, 0x0C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00], // `
    [0x00, 0x00, 0x1E, 0x30, 0x3E, 0x33, 0x6E, 0x00], // a
    [0x07, 0x06, 0x06, 0x3E, 0x66, 0x66, 0x3B, 0x00], // b
    [0x00, 0x00, 0x1E, 0x33, 0x03, 0x33, 0x1E, 0x00], // c
    [0x38, 0x30, 0x30, 0x3E, 0x33, 0x33, 0x6E, 0x00], // d
    [0x00, 0x00, 0x1E, 0x33, 0x3F, 0x03, 0x1E, 0x00], // e
    [0x1C, 0x36, 0x06, 0x0F, 0x06, 0x06, 0x0F, 0x00], // f
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x1F], // g
    [0x07, 0x06, 0x36, 0x6E, 0x66, 0x66, 0x67, 0x00], // h
    [0x0C, 0x00, 0x0E, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // i
    [0x30, 0x00, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E], // j
    [0x07, 0x06, 0x66, 0x36, 0x1E, 0x36, 0x67, 0x00], // k
    [0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // l
    [0x00, 0x00, 0x33, 0x7F, 0x7F, 0x6B, 0x63, 0x00], // m
    [0x00, 0x00, 0x1F, 0x33, 0x33, 0x33, 0x33, 0x00], // n
    [0x00, 0x00, 0x1E, 0x33, 0x33, 0x33, 0x1E, 0x00], // o
    [0x00, 0x00, 0x3B, 0x66, 0x66, 0x3E, 0x06, 0x0F], // p
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x78], // q
    [0x00, 0x00, 0x3B, 0x6E, 0x66, 0x06, 0x0F, 0x00], // r
    [0x00, 0x00, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x00], // s
    [0x08, 0x0C, 0x3E, 0x0C, 0x0C, 0x2C, 0x18, 0x00], // t
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x33, 0x6E, 0x00], // u
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // v
    [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x7F, 0x36, 0x00], // w
    [0x00, 0x00, 0x63, 0x36, 0x1C, 0x36, 0x63, 0x00], // x
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x3E, 0x30, 0x1F], // y
    [0x00, 0x00, 0x3F, 0x19, 0x0C, 0x26, 0x3F, 0x00], // z
    [0x38, 0x0C, 0x0C, 0x07, 0x0C, 0x0C, 0x38, 0x00], // {
    [0x18, 0x18, 0x18, 0x00, 0x18, 0x18, 0x18, 0x00], // |
    [0x07, 0x0C, 0x0C, 0x38, 0x0C, 0x0C, 0x07, 0x00], // }
    [0x6E, 0x3B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ~
];
