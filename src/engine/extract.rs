//! Page image extraction: drive `pdfimages` to write one TIFF per image into the work directory.

use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::Opts;
use crate::error::OcrError;
use crate::utils::config::ExternalTools;

/// Arguments for the extractor. `-l` is passed only when the last page is at or after the first.
pub fn extract_args(opts: &Opts, dir: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-tiff".into(),
        "-f".into(),
        opts.first_page.to_string().into(),
    ];
    if let Some(last) = opts.last_page
        && last >= opts.first_page
    {
        args.push("-l".into());
        args.push(last.to_string().into());
    }
    args.push(opts.input.clone().into_os_string());
    args.push(dir.join(ExternalTools::IMAGE_ROOT).into_os_string());
    args
}

/// Extract page images of `opts.input` into `dir`.
pub fn extract_images(opts: &Opts, dir: &Path) -> Result<()> {
    let args = extract_args(opts, dir);
    debug!("{} {:?}", ExternalTools::EXTRACTOR, args);
    let out = Command::new(ExternalTools::EXTRACTOR)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| OcrError::Tool {
            tool: ExternalTools::EXTRACTOR,
            message: e.to_string(),
        })?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let message = match stderr.trim() {
            "" => out.status.to_string(),
            msg => msg.to_string(),
        };
        return Err(OcrError::Tool {
            tool: ExternalTools::EXTRACTOR,
            message,
        }
        .into());
    }
    Ok(())
}
