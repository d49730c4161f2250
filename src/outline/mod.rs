//! Outline inference.
//!
//! The pipeline runs in five steps over a parsed [`SourceDocument`]:
//!
//! 1. [`extract_spans`] keeps candidate runs and drops table cells and noise
//! 2. [`resolve_title`] picks the title from metadata or the first page
//! 3. [`ClusterMap::build`] groups span sizes into heading tiers
//! 4. [`HeadingClassifier`] rejects tiered spans that do not read like headings
//! 5. [`assemble_outline`] emits the surviving spans in document order
//!
//! [`OutlineExtractor`] ties these together with a configuration, a tagger
//! and parse options.

mod assemble;
mod classify;
pub mod cluster;
mod spans;
mod title;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub use assemble::assemble_outline;
pub use classify::{HeadingClassifier, Rejection};
pub use cluster::{kmeans_1d, ClusterMap, Clustering, Tier};
pub use spans::{extract_spans, is_noise, is_table_like};
pub use title::resolve_title;

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::model::{OutlineResult, SourceDocument, Span};
use crate::nlp::{LexiconTagger, PosTagger};
use crate::parser::{ParseOptions, PdfParser};

/// Intermediate state of one run, exposed for diagnostics.
#[derive(Debug, Clone)]
pub struct OutlineAnalysis {
    /// Resolved title
    pub title: String,
    /// Candidate spans in document order
    pub spans: Vec<Span>,
    /// Tier assignment of the spans
    pub clusters: ClusterMap,
}

/// Infers outlines from PDFs.
///
/// The extractor is immutable and `Send + Sync`; one instance can serve any
/// number of documents, from any number of threads.
#[derive(Clone)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    tagger: Arc<dyn PosTagger>,
    parse_options: ParseOptions,
}

impl OutlineExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self {
            config: OutlineConfig::default(),
            tagger: Arc::new(LexiconTagger::new()),
            parse_options: ParseOptions::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) if
    /// the configuration cannot drive the pipeline.
    pub fn with_config(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replace the part-of-speech tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// The active parse options.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Run the pipeline up to clustering.
    pub fn analyze(&self, doc: &SourceDocument) -> OutlineAnalysis {
        let title = resolve_title(doc, &self.config);
        let spans = extract_spans(doc);
        let clusters = ClusterMap::build(&spans, self.config.max_tiers);
        OutlineAnalysis {
            title,
            spans,
            clusters,
        }
    }

    /// Infer the outline of an already parsed document.
    pub fn extract_document(&self, doc: &SourceDocument) -> OutlineResult {
        let analysis = self.analyze(doc);
        let classifier = HeadingClassifier::new(&self.config, Arc::clone(&self.tagger));
        let outline = assemble_outline(&analysis.spans, &analysis.clusters, &classifier);
        OutlineResult::new(analysis.title, outline)
    }

    /// Parse a PDF file and infer its outline.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let parser = PdfParser::open_with_options(path, self.parse_options.clone())?;
        Ok(self.extract_document(&parser.parse()?))
    }

    /// Parse PDF bytes and infer the outline.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<OutlineResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?;
        Ok(self.extract_document(&parser.parse()?))
    }

    /// Read a PDF from a reader and infer the outline.
    pub fn extract_reader<R: Read>(&self, reader: R) -> Result<OutlineResult> {
        let parser = PdfParser::from_reader_with_options(reader, self.parse_options.clone())?;
        Ok(self.extract_document(&parser.parse()?))
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutlineExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineExtractor")
            .field("config", &self.config)
            .field("parse_options", &self.parse_options)
            .finish_non_exhaustive()
    }
}
