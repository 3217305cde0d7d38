//! Output layout, file naming and zip bundling

use crate::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Strip a recipient name down to filesystem-safe characters
///
/// Keeps alphanumerics, spaces, hyphens and underscores, drops everything
/// else, then trims trailing whitespace. Two names that sanitize to the
/// same string overwrite each other's files; last row wins.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Directory layout for one batch run
///
/// Rendered rasters land in `<root>/png`, composed documents in
/// `<root>/pdf`. Both directories are created up front.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    png_dir: PathBuf,
    pdf_dir: PathBuf,
}

impl OutputLayout {
    /// Create the layout rooted at `root`, making directories as needed
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        let png_dir = root.as_ref().join("png");
        let pdf_dir = root.as_ref().join("pdf");
        fs::create_dir_all(&png_dir)?;
        fs::create_dir_all(&pdf_dir)?;
        Ok(Self { png_dir, pdf_dir })
    }

    pub fn front_path(&self, safe_name: &str) -> PathBuf {
        self.png_dir.join(format!("{safe_name}_front.png"))
    }

    pub fn back_path(&self, safe_name: &str) -> PathBuf {
        self.png_dir.join(format!("{safe_name}_back.png"))
    }

    pub fn document_path(&self, safe_name: &str) -> PathBuf {
        self.pdf_dir.join(format!("{safe_name}_document.pdf"))
    }

    pub fn pdf_dir(&self) -> &Path {
        &self.pdf_dir
    }
}

/// Bundle every composed document under the layout into one zip file
///
/// Entries are stored by file name in sorted order. Returns the number
/// of documents bundled.
pub fn archive_documents<P: AsRef<Path>>(layout: &OutputLayout, zip_path: P) -> Result<usize> {
    let mut documents: Vec<PathBuf> = fs::read_dir(layout.pdf_dir())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "pdf"))
        .collect();
    documents.sort();

    let file = fs::File::create(zip_path.as_ref())?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for path in &documents {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writer.start_file(name, options)?;
        writer.write_all(&fs::read(path)?)?;
    }
    writer.finish()?;

    log::info!(
        "archived {} documents into {}",
        documents.len(),
        zip_path.as_ref().display()
    );
    Ok(documents.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_name("Jane Doe"), "Jane Doe");
        assert_eq!(sanitize_name("Ana-María_2"), "Ana-María_2");
    }

    #[test]
    fn test_sanitize_strips_path_hazards() {
        assert_eq!(sanitize_name("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_name("a/b\\c:d*e"), "abcde");
    }

    #[test]
    fn test_sanitize_trims_trailing_whitespace() {
        // Stripping punctuation can leave a trailing space behind
        assert_eq!(sanitize_name("Jane Doe!!!"), "Jane Doe");
        assert_eq!(sanitize_name("Jane ."), "Jane");
    }

    #[test]
    fn test_sanitize_collision() {
        // Distinct raw names can collapse to the same safe name
        assert_eq!(sanitize_name("Jane/Doe"), sanitize_name("Jane.Doe!"));
    }

    #[test]
    fn test_layout_paths() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::create(dir.path()).unwrap();
        assert_eq!(
            layout.front_path("Jane Doe"),
            dir.path().join("png").join("Jane Doe_front.png")
        );
        assert_eq!(
            layout.back_path("Jane Doe"),
            dir.path().join("png").join("Jane Doe_back.png")
        );
        assert_eq!(
            layout.document_path("Jane Doe"),
            dir.path().join("pdf").join("Jane Doe_document.pdf")
        );
        assert!(dir.path().join("png").is_dir());
        assert!(dir.path().join("pdf").is_dir());
    }

    #[test]
    fn test_archive_bundles_pdfs_only() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::create(dir.path()).unwrap();
        fs::write(layout.document_path("a"), b"pdf a").unwrap();
        fs::write(layout.document_path("b"), b"pdf b").unwrap();
        fs::write(layout.pdf_dir().join("stray.txt"), b"not a pdf").unwrap();

        let zip_path = dir.path().join("bundle.zip");
        let count = archive_documents(&layout, &zip_path).unwrap();
        assert_eq!(count, 2);

        let mut archive = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["a_document.pdf", "b_document.pdf"]);
    }

    #[test]
    fn test_archive_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::create(dir.path()).unwrap();
        let count = archive_documents(&layout, dir.path().join("bundle.zip")).unwrap();
        assert_eq!(count, 0);
    }
}
