//! Raster embedding for composed documents

use crate::{ComposeError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use lopdf::{dictionary, Stream};
use std::io::Cursor;

/// Raster format accepted as a page background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

/// Detect the raster format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<RasterFormat> {
    if data.len() < 8 {
        return Err(ComposeError::ImageError(
            "Raster data too short".to_string(),
        ));
    }

    // JPEG starts with FF D8 FF
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return Ok(RasterFormat::Jpeg);
    }

    // PNG starts with 89 50 4E 47 0D 0A 1A 0A
    if data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(RasterFormat::Png);
    }

    Err(ComposeError::ImageError(
        "Unknown raster format".to_string(),
    ))
}

/// Frame parsed from a JPEG SOF segment
#[derive(Debug, Clone, Copy)]
struct JpegFrame {
    width: u32,
    height: u32,
    num_components: u8,
}

/// A rendered page raster, ready for PDF embedding as an image XObject
///
/// JPEG data passes through untouched under DCTDecode. PNG data is
/// decoded, alpha-blended over white, and re-encoded with FlateDecode.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub filter: &'static str,
    pub data: Vec<u8>,
}

impl PageImage {
    /// Build a page image from raw file bytes, dispatching on magic bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format(data)? {
            RasterFormat::Jpeg => Self::from_jpeg(data),
            RasterFormat::Png => Self::from_png(data),
        }
    }

    /// Embed JPEG data directly with the DCTDecode filter
    pub fn from_jpeg(data: &[u8]) -> Result<Self> {
        let frame = parse_jpeg_frame(data)?;

        let color_space = if frame.num_components == 1 {
            "DeviceGray"
        } else {
            "DeviceRGB"
        };

        Ok(Self {
            width: frame.width,
            height: frame.height,
            color_space,
            filter: "DCTDecode",
            data: data.to_vec(),
        })
    }

    /// Decode PNG data, flatten any alpha over white, compress with zlib
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let decoder = reader.into_decoder()?;

        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        let decoded = DynamicImage::from_decoder(decoder)?;

        let (raw, color_space) = match color_type {
            image::ColorType::L8 | image::ColorType::L16 => {
                (decoded.to_luma8().into_raw(), "DeviceGray")
            }
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = decoded.to_luma_alpha8();
                let mut gray = Vec::with_capacity((width * height) as usize);
                for pixel in la.pixels() {
                    gray.push(blend_over_white(pixel[0], pixel[1]));
                }
                (gray, "DeviceGray")
            }
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = decoded.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                for pixel in rgba.pixels() {
                    rgb.push(blend_over_white(pixel[0], pixel[3]));
                    rgb.push(blend_over_white(pixel[1], pixel[3]));
                    rgb.push(blend_over_white(pixel[2], pixel[3]));
                }
                (rgb, "DeviceRGB")
            }
            _ => (decoded.to_rgb8().into_raw(), "DeviceRGB"),
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        std::io::Write::write_all(&mut encoder, &raw)?;
        let data = encoder.finish()?;

        Ok(Self {
            width,
            height,
            color_space,
            filter: "FlateDecode",
            data,
        })
    }

    /// Centered aspect-fit placement rectangle on a page
    ///
    /// Returns `(x, y, width, height)` in points, y from the page bottom.
    pub fn placement(&self, page_width: f64, page_height: f64) -> (f64, f64, f64, f64) {
        let scale = (page_width / self.width as f64).min(page_height / self.height as f64);
        let width = self.width as f64 * scale;
        let height = self.height as f64 * scale;
        (
            (page_width - width) / 2.0,
            (page_height - height) / 2.0,
            width,
            height,
        )
    }

    /// Content stream operators drawing this image into a placement rect
    pub fn draw_operators(&self, name: &str, page_width: f64, page_height: f64) -> Vec<u8> {
        let (x, y, width, height) = self.placement(page_width, page_height);
        // q / cm / Do / Q: save state, map the unit square, draw, restore
        format!("q\n{width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm\n/{name} Do\nQ\n").into_bytes()
    }

    /// Convert to a lopdf stream object
    pub fn to_stream(&self) -> Stream {
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => self.width as i64,
                "Height" => self.height as i64,
                "ColorSpace" => self.color_space,
                "BitsPerComponent" => 8,
                "Filter" => self.filter,
            },
            self.data.clone(),
        )
    }
}

fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (channel as f32 * a + 255.0 * (1.0 - a)) as u8
}

/// Locate an SOF marker and pull frame geometry out of it
fn parse_jpeg_frame(data: &[u8]) -> Result<JpegFrame> {
    // SOF segment: marker (2), length (2), precision (1), height (2),
    // width (2), component count (1)
    let mut i = 2;
    while i + 10 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];
        // C4/C8/CC are huffman/arithmetic tables, not frames
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            return Ok(JpegFrame {
                height: u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32,
                width: u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32,
                num_components: data[i + 9],
            });
        }

        if i + 4 < data.len() {
            let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            if length < 2 {
                break;
            }
            i += 2 + length;
        } else {
            break;
        }
    }

    Err(ComposeError::ImageError(
        "Could not parse JPEG frame".to_string(),
    ))
}
