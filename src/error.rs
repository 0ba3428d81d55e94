//! Domain errors. Propagated inside `anyhow::Error`; use `downcast_ref::<OcrError>()` to match.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    /// Extraction produced no page images, so there is nothing to recognize.
    #[error("no page images found in {}", .0.display())]
    NoImages(PathBuf),

    /// One page's recognition failed. `page` is the human-facing page number.
    #[error("(page {page}) {message}")]
    Page { page: u32, message: String },

    /// An external tool (e.g. the image extractor) failed outside the per-page jobs.
    #[error("{tool}: {message}")]
    Tool { tool: &'static str, message: String },

    #[error("Rule definition in \"{file}\", line {line}: {message}.")]
    Rule {
        file: String,
        line: usize,
        message: String,
    },

    #[error("{0}")]
    InvalidOption(String),
}
