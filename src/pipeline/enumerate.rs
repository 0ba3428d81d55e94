//! Work enumeration: list page images in the work directory and number them in name order.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

use crate::engine::tools::glob_match;
use crate::error::OcrError;
use crate::types::WorkItem;

/// List files in `dir` (not recursive) whose names match `pattern`, sorted by name,
/// and number them 0..N-1. Fails with [`OcrError::NoImages`] when nothing matches.
pub fn enumerate_work(dir: &Path, pattern: &str) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list images in {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| glob_match(pattern, name));
        if matches {
            items.push(WorkItem {
                seq: items.len(),
                image: entry.into_path(),
            });
        }
    }
    if items.is_empty() {
        return Err(OcrError::NoImages(dir.to_path_buf()).into());
    }
    debug!("Found {} page images", items.len());
    Ok(items)
}
