//! Public and internal types for the ocrpdf API and pipeline.

use std::path::PathBuf;

use crate::error::OcrError;
use crate::utils::config::DEFAULT_LANGUAGE;

/// One page image to recognize. `seq` is the 0-based rank of the image in sorted
/// name order; it is dense (0..N-1) and never reassigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub seq: usize,
    pub image: PathBuf,
}

/// Outcome of recognizing one [`WorkItem`]. Exactly one is produced per item.
/// A failed job carries no payload.
#[derive(Debug)]
pub struct JobResult {
    pub seq: usize,
    pub outcome: Result<Vec<u8>, OcrError>,
}

impl JobResult {
    pub fn ok(seq: usize, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            seq,
            outcome: Ok(payload.into()),
        }
    }

    pub fn failed(seq: usize, err: OcrError) -> Self {
        Self {
            seq,
            outcome: Err(err),
        }
    }
}

/// Full options (CLI and lib). Built once and passed by reference into every component.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Document to extract page images from.
    pub input: PathBuf,
    /// Output file. When None, text goes to stdout.
    pub output: Option<PathBuf>,
    /// First page to process (1-based). Also the offset used for page numbers in errors.
    pub first_page: u32,
    /// Last page to process. Ignored unless `>= first_page`.
    pub last_page: Option<u32>,
    /// Recognition language passed to the recognizer (e.g. `eng`).
    pub language: String,
    /// Rule files, applied in order.
    pub filters: Vec<PathBuf>,
    /// Override worker thread count. When None, derived from available threads and FD limit.
    pub num_threads: Option<usize>,
    /// Show progress bar (verbose mode).
    pub verbose: bool,
    /// When true, install a Ctrl+C handler that removes the work directory and exits (CLI).
    pub handle_interrupts: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            first_page: 1,
            last_page: None,
            language: DEFAULT_LANGUAGE.to_string(),
            filters: Vec::new(),
            num_threads: None,
            verbose: false,
            handle_interrupts: false,
        }
    }
}
