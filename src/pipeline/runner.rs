//! Job runner: one synchronous recognizer invocation per work item.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::engine::tools::first_line;
use crate::error::OcrError;
use crate::types::{JobResult, WorkItem};
use crate::utils::config::ExternalTools;

/// Why a recognizer call failed.
#[derive(Debug)]
pub enum ToolFailure {
    /// The tool ran and exited unsuccessfully; `stderr` is its diagnostic stream.
    Exited { stderr: Vec<u8> },
    /// The tool could not be started or waited on.
    Io(std::io::Error),
}

/// External recognition step. Implementations must be callable from many workers at once.
pub trait Recognize: Send + Sync {
    fn recognize(&self, image: &Path) -> Result<Vec<u8>, ToolFailure>;
}

/// `tesseract IMAGE - -l LANG`, text on stdout.
#[derive(Clone, Debug)]
pub struct Tesseract {
    language: String,
}

impl Tesseract {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

impl Recognize for Tesseract {
    fn recognize(&self, image: &Path) -> Result<Vec<u8>, ToolFailure> {
        let out = Command::new(ExternalTools::RECOGNIZER)
            .arg(image)
            .arg("-")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .output()
            .map_err(ToolFailure::Io)?;
        if out.status.success() {
            return Ok(out.stdout);
        }
        // Silent failure: report the exit status instead of an empty message.
        let stderr = if out.stderr.trim_ascii().is_empty() {
            out.status.to_string().into_bytes()
        } else {
            out.stderr
        };
        Err(ToolFailure::Exited { stderr })
    }
}

/// Runs the recognizer for one item and tags failures with the human-facing page number.
/// No retries.
#[derive(Clone)]
pub struct JobRunner {
    recognizer: Arc<dyn Recognize>,
    first_page: u32,
}

impl JobRunner {
    pub fn new(recognizer: Arc<dyn Recognize>, first_page: u32) -> Self {
        Self {
            recognizer,
            first_page,
        }
    }

    pub fn run(&self, item: &WorkItem) -> JobResult {
        match self.recognizer.recognize(&item.image) {
            Ok(payload) => JobResult::ok(item.seq, payload),
            Err(failure) => JobResult::failed(item.seq, self.page_error(item.seq, failure)),
        }
    }

    fn page_error(&self, seq: usize, failure: ToolFailure) -> OcrError {
        let message = match failure {
            ToolFailure::Exited { stderr } => first_line(&stderr),
            ToolFailure::Io(e) => e.to_string(),
        };
        let page = u32::try_from(seq).map_or(u32::MAX, |s| self.first_page.saturating_add(s));
        OcrError::Page { page, message }
    }
}
