//! PDF document parser.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Metadata, SourceDocument, SourcePage};

use super::backend::{LopdfBackend, PdfBackend};
use super::content::{extract_page_runs, merge_adjacent_runs};
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
///
/// Generic over the backend so the interpretation logic can be driven by
/// test doubles; the default backend is lopdf.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_reader(reader)?;
        Ok(Self::with_backend(backend, options))
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already loaded backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Parse the document into per-page text runs plus metadata.
    pub fn parse(&self) -> Result<SourceDocument> {
        let pages = self.backend.pages();
        let mut document = SourceDocument::new();
        document.metadata = Metadata {
            title: self.backend.info_title(),
            pdf_version: self.backend.version(),
            page_count: pages.len() as u32,
        };

        for (&page_num, &page_id) in &pages {
            let mut page = SourcePage::new(page_num);

            match extract_page_runs(&self.backend, page_id) {
                Ok(runs) => {
                    page.runs = if self.options.merge_runs {
                        merge_adjacent_runs(runs)
                    } else {
                        runs
                    };
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to read text from page {}: {}", page_num, e);
                }
            }

            document.add_page(page);
        }

        log::debug!(
            "Parsed {} pages, {} text runs",
            document.page_count(),
            document.run_count()
        );

        Ok(document)
    }

    /// Parse a single page (1-indexed).
    pub fn parse_page(&self, page_num: u32) -> Result<SourcePage> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let runs = extract_page_runs(&self.backend, *page_id)?;
        let mut page = SourcePage::new(page_num);
        page.runs = if self.options.merge_runs {
            merge_adjacent_runs(runs)
        } else {
            runs
        };
        Ok(page)
    }

    /// Access the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
