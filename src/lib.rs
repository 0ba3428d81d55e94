//! ocrpdf: extract text from scanned PDF documents.
//!
//! Page images are recognized by a pool of workers and the text is stitched back together
//! in page order, with optional substitution rules applied per line and to the whole text.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::OcrError;
pub use types::*;

use log::debug;
use std::sync::Arc;

use crate::engine::filters::Filters;
use crate::engine::progress::{create_progress_bar, progress_callback};
use crate::pipeline::Tesseract;
use crate::utils::WorkDir;

/// Result alias used by public ocrpdf API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: extract the page images of `opts.input`, recognize them, and return the
/// filtered text.
///
/// The work directory is removed before this returns, on success and on error. With
/// `opts.handle_interrupts`, Ctrl+C also removes it and exits the process with status 1.
pub fn ocr_document(opts: &Opts, filters: &Filters) -> Result<Vec<u8>> {
    let workdir = WorkDir::acquire()?;
    if opts.handle_interrupts {
        workdir.release_on_interrupt()?;
    }

    engine::extract_images(opts, workdir.path())?;

    let bar = opts.verbose.then(|| create_progress_bar(0, "Recognizing"));
    let recognizer = Arc::new(Tesseract::new(&opts.language));
    let text = pipeline::run_ocr(
        workdir.path(),
        opts,
        recognizer,
        filters,
        progress_callback(&bar),
    )?;
    if bar.is_some() {
        eprintln!();
    }

    workdir.release()?;
    debug!("Recognized {} bytes of text", text.len());
    Ok(text)
}
