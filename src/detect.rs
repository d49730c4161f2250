//! PDF header detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Read the PDF version from the first bytes of a document.
///
/// Returns `Error::UnknownFormat` when the magic is missing and
/// `Error::UnsupportedVersion` when the version is not of the form `d.d`.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let raw = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(raw).to_string();
    match raw {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(version),
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Read the PDF version from a file header.
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Whether a path names a PDF by extension (case-insensitive).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        assert_eq!(pdf_version(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap(), "1.7");
        assert_eq!(pdf_version(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            pdf_version(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(pdf_version(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(pdf_version(b""), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        assert!(matches!(
            pdf_version(b"%PDF-abc\n"),
            Err(Error::UnsupportedVersion(v)) if v == "abc"
        ));
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension("report.pdf"));
        assert!(has_pdf_extension("REPORT.PDF"));
        assert!(!has_pdf_extension("report.json"));
        assert!(!has_pdf_extension("pdf"));
    }
}
