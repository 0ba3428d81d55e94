//! Load `.ocrpdf.toml` from a directory (CLI only). Lib callers build [`Opts`] themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct OcrpdfToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    language: Option<String>,
    filters: Option<Vec<String>>,
    threads: Option<usize>,
    verbose: Option<bool>,
}

/// Parse settings from a TOML string. Unknown keys are ignored.
pub fn parse_ocrpdf_toml(s: &str) -> Result<OcrpdfToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load the settings file from `dir`. `Ok(None)` when there is no file; `Err` when it is
/// unreadable or malformed (callers warn and continue with defaults).
pub fn load_ocrpdf_toml(dir: &Path) -> Result<Option<OcrpdfToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse_ocrpdf_toml(&s)
        .map(Some)
        .with_context(|| format!("parse {}", path.display()))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before applying CLI flags.
/// Relative filter paths are resolved against `dir`.
pub fn apply_file_to_opts(file: &OcrpdfToml, dir: &Path, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, language => language);
    apply_file_opt!(s, opts, verbose => verbose);
    if let Some(n) = s.threads {
        opts.num_threads = Some(n);
    }
    if let Some(ref v) = s.filters {
        opts.filters = v.iter().map(|p| dir.join(PathBuf::from(p))).collect();
    }
}
