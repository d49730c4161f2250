//! Directory batch processing.
//!
//! Runs outline inference over every PDF in a directory and writes one
//! `<stem>.json` per input. A failing document is logged and recorded; it
//! never stops the rest of the batch.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::Result;
use crate::model::OutlineResult;
use crate::outline::OutlineExtractor;
use crate::render::{write_json, JsonFormat};

/// A document that was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Input PDF
    pub input: PathBuf,
    /// Written JSON file
    pub output: PathBuf,
    /// Number of headings found
    pub headings: usize,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Input PDF
    pub input: PathBuf,
    /// Error message
    pub error: String,
}

/// Outcome of one document in a batch.
pub type BatchOutcome = std::result::Result<BatchItem, BatchFailure>;

/// Summary of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Successfully processed documents
    pub processed: Vec<BatchItem>,
    /// Documents that failed
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Total number of documents attempted.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    /// Whether every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Processes a directory of PDFs.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    extractor: OutlineExtractor,
    parallel: bool,
}

impl BatchRunner {
    /// Create a runner; documents are processed in parallel by default.
    pub fn new(extractor: OutlineExtractor) -> Self {
        Self {
            extractor,
            parallel: true,
        }
    }

    /// Enable or disable parallel processing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// List the PDFs in `input_dir`, sorted by file name.
    pub fn discover<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && has_pdf_extension(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Process every PDF in `input_dir`, writing JSON into `output_dir`.
    ///
    /// Only setup failures (unreadable input directory, uncreatable output
    /// directory) are returned as errors.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `progress` after each document.
    ///
    /// In parallel mode the callback runs on worker threads, in completion order.
    pub fn run_with_progress<P, Q, F>(
        &self,
        input_dir: P,
        output_dir: Q,
        progress: F,
    ) -> Result<BatchReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: Fn(&BatchOutcome) + Send + Sync,
    {
        let files = Self::discover(&input_dir)?;
        log::info!(
            "Processing {} PDF files from {}",
            files.len(),
            input_dir.as_ref().display()
        );
        self.run_files(&files, output_dir, progress)
    }

    /// Process an already discovered list of PDFs into `output_dir`.
    ///
    /// The report covers exactly `files`, in the given order.
    pub fn run_files<Q, F>(
        &self,
        files: &[PathBuf],
        output_dir: Q,
        progress: F,
    ) -> Result<BatchReport>
    where
        Q: AsRef<Path>,
        F: Fn(&BatchOutcome) + Send + Sync,
    {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let process = |path: &PathBuf| {
            let outcome = self.process_one(path, output_dir);
            progress(&outcome);
            outcome
        };

        let outcomes: Vec<BatchOutcome> = if self.parallel {
            files.par_iter().map(process).collect()
        } else {
            files.iter().map(process).collect()
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(item) => report.processed.push(item),
                Err(failure) => report.failed.push(failure),
            }
        }

        log::info!(
            "Batch finished: {} processed, {} failed",
            report.processed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Process a single PDF into `output_dir`.
    pub fn process_one(&self, input: &Path, output_dir: &Path) -> BatchOutcome {
        let output = output_path(input, output_dir);
        match self.write_outline(input, &output) {
            Ok(headings) => Ok(BatchItem {
                input: input.to_path_buf(),
                output,
                headings,
            }),
            Err(e) => {
                log::error!("Failed to process {}: {}", input.display(), e);
                Err(BatchFailure {
                    input: input.to_path_buf(),
                    error: e.to_string(),
                })
            }
        }
    }

    fn write_outline(&self, input: &Path, output: &Path) -> Result<usize> {
        let result = self.extractor.extract_file(input)?;
        save_json(&result, File::create(output)?)?;
        Ok(result.len())
    }
}

/// Write pretty JSON through a buffer; a failing final flush is an error.
fn save_json<W: Write>(result: &OutlineResult, sink: W) -> Result<()> {
    let mut writer = BufWriter::new(sink);
    write_json(result, &mut writer, JsonFormat::Pretty)?;
    writer.flush()?;
    Ok(())
}

/// `<output_dir>/<stem>.json` for an input file.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io;
    use tempfile::TempDir;

    /// Accepts nothing; every write fails.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_save_json_reports_flush_failure() {
        // Small enough to sit in the buffer until the final flush
        let result = OutlineResult::new("Report", Vec::new());
        assert!(matches!(save_json(&result, FullDisk), Err(Error::Io(_))));
    }

    #[test]
    fn test_save_json_writes_everything() {
        let mut out = Vec::new();
        save_json(&OutlineResult::new("Report", Vec::new()), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["title"], "Report");
    }

    #[test]
    fn test_run_files_covers_only_given_list() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let listed = input.path().join("listed.pdf");
        fs::write(&listed, b"not a pdf at all").unwrap();
        fs::write(input.path().join("late.pdf"), b"not a pdf at all").unwrap();

        let report = BatchRunner::new(OutlineExtractor::new())
            .parallel(false)
            .run_files(&[listed.clone()], output.path(), |_| {})
            .unwrap();

        assert_eq!(report.total(), 1);
        assert_eq!(report.failed[0].input, listed);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/in/report.final.PDF"), Path::new("/out")),
            PathBuf::from("/out/report.final.json")
        );
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "A.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let files = BatchRunner::discover(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.PDF", "b.pdf"]);
    }

    #[test]
    fn test_failures_are_recorded_not_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("broken.pdf"), b"not a pdf at all").unwrap();

        let report = BatchRunner::new(OutlineExtractor::new())
            .parallel(false)
            .run(input.path(), output.path().join("json"))
            .unwrap();

        assert_eq!(report.total(), 1);
        assert!(!report.is_success());
        assert!(report.failed[0].error.contains("Unknown file format"));
        assert!(output.path().join("json").is_dir());
        assert!(!output.path().join("json/broken.json").exists());
    }

    #[test]
    fn test_missing_input_dir_is_an_error() {
        let output = TempDir::new().unwrap();
        let runner = BatchRunner::new(OutlineExtractor::new());
        assert!(runner
            .run(output.path().join("missing"), output.path())
            .is_err());
    }
}
