//! Two-page document assembly

use crate::image::PageImage;
use crate::{ComposeError, Result};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// A4 portrait width in points
pub const A4_WIDTH_PT: f64 = 595.28;
/// A4 portrait height in points
pub const A4_HEIGHT_PT: f64 = 841.89;

/// Compose the front and back rasters into a two-page A4 PDF on disk
///
/// Page order is fixed: front first, back second. Each raster is scaled
/// to fit its page with aspect ratio preserved and centered.
pub fn compose<P: AsRef<Path>>(front_path: P, back_path: P, out_path: P) -> Result<()> {
    let front = read_page(front_path.as_ref())?;
    let back = read_page(back_path.as_ref())?;

    let bytes = compose_to_bytes(&front, &back)?;
    std::fs::write(out_path.as_ref(), bytes)?;
    log::debug!("composed document: {}", out_path.as_ref().display());
    Ok(())
}

/// Compose front and back raster bytes into an in-memory PDF
pub fn compose_to_bytes(front: &[u8], back: &[u8]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(2);
    for data in [front, back] {
        let page = PageImage::from_bytes(data)?;
        let operators = page.draw_operators("Im1", A4_WIDTH_PT, A4_HEIGHT_PT);

        let image_id = doc.add_object(page.to_stream());
        let contents_id = doc.add_object(Stream::new(dictionary! {}, operators));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), A4_WIDTH_PT.into(), A4_HEIGHT_PT.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im1" => image_id },
            },
            "Contents" => contents_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("certgen"),
        "CreationDate" => Object::string_literal(
            chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string(),
        ),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn read_page(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ComposeError::PageLoad(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let raster = image::RgbaImage::from_pixel(width, height, image::Rgba([250, 250, 250, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(raster)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_compose_to_bytes_two_pages() {
        let bytes = compose_to_bytes(&png_bytes(40, 60), &png_bytes(40, 60)).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_compose_pages_are_a4() {
        let bytes = compose_to_bytes(&png_bytes(30, 30), &png_bytes(30, 30)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        for (_, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            assert_eq!(media_box[2].as_float().unwrap(), A4_WIDTH_PT as f32);
            assert_eq!(media_box[3].as_float().unwrap(), A4_HEIGHT_PT as f32);
        }
    }

    #[test]
    fn test_compose_pages_reference_image_xobjects() {
        let bytes = compose_to_bytes(&png_bytes(30, 30), &png_bytes(30, 30)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        for (_, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            assert!(xobjects.has(b"Im1"));
        }
    }

    #[test]
    fn test_compose_rejects_garbage_page() {
        assert!(compose_to_bytes(b"not a raster", &png_bytes(10, 10)).is_err());
    }

    #[test]
    fn test_compose_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.png");
        let back = dir.path().join("back.png");
        let out = dir.path().join("out.pdf");
        std::fs::write(&front, png_bytes(20, 30)).unwrap();
        std::fs::write(&back, png_bytes(20, 30)).unwrap();

        compose(&front, &back, &out).unwrap();

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_compose_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let missing = dir.path().join("nope.png");
        let err = compose(&missing, &missing, &out).unwrap_err();
        assert!(matches!(err, ComposeError::PageLoad(_)));
    }
}
