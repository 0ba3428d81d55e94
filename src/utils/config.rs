//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    workdir_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                workdir_prefix: format!("{pkg}-"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Optional settings file looked up in the current directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Prefix for the temporary work directory holding extracted images.
    pub fn workdir_prefix(&self) -> &str {
        &self.workdir_prefix
    }
}

// ---- External tools ----

/// Names of the external programs driven by the CLI.
pub struct ExternalTools;

impl ExternalTools {
    /// Page image extractor (poppler-utils).
    pub const EXTRACTOR: &'static str = "pdfimages";
    /// Text recognizer.
    pub const RECOGNIZER: &'static str = "tesseract";
    /// File name root handed to the extractor; images land as `page-000.tif`, `page-001.tif`, ...
    pub const IMAGE_ROOT: &'static str = "page";
    /// Glob for the images the extractor writes (`-tiff`).
    pub const IMAGE_PATTERN: &'static str = "*.tif";
}

// ---- Options ----

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Upper bound for `--first` / `--last`.
pub const MAX_PAGES: u32 = 3000;

// ---- Worker threads ----

/// Thread limits for the recognition pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Floor / minimum worker count.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}
