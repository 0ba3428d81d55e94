//! CLI command handler: build options, run the document through the pipeline, write the text.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::filters::Filters;
use crate::engine::output::write_output;
use crate::error::OcrError;
use crate::ocr_document;
use crate::utils::{OcrpdfToml, apply_file_to_opts, load_ocrpdf_toml, setup_logging};

/// Defaults, then the settings file (read from `config_dir`), then CLI flags.
pub fn build_opts(cli: &Cli, file: Option<&OcrpdfToml>, config_dir: &Path) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, config_dir, &mut opts);
    }
    opts.input = cli.input.clone();
    opts.output = cli.output.clone();
    opts.first_page = cli.first;
    opts.last_page = cli.last;
    if let Some(ref lang) = cli.language {
        opts.language = lang.clone();
    }
    opts.filters.extend(cli.filters.iter().cloned());
    if let Some(n) = cli.threads {
        opts.num_threads = Some(n as usize);
    }
    if cli.verbose {
        opts.verbose = true;
    }
    opts.handle_interrupts = true;
    opts
}

/// Reject options that parse but cannot work.
pub fn validate_opts(opts: &Opts) -> Result<(), OcrError> {
    if opts.language.trim().is_empty() {
        return Err(OcrError::InvalidOption("Missing argument for option \"--language\"".into()));
    }
    if opts.num_threads == Some(0) {
        return Err(OcrError::InvalidOption("Worker thread count must be at least 1".into()));
    }
    for f in &opts.filters {
        match std::fs::metadata(f) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(OcrError::InvalidOption(format!(
                    "\"{}\" is not a file",
                    f.display()
                )));
            }
            Err(e) => {
                return Err(OcrError::InvalidOption(format!("{}: {}", f.display(), e)));
            }
        }
    }
    Ok(())
}

/// Run the document through extraction and recognition, then write the text to the sink.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let config_dir = Path::new(".");
    let file = load_ocrpdf_toml(config_dir);
    let opts = build_opts(cli, file.as_ref().ok().and_then(Option::as_ref), config_dir);
    setup_logging(opts.verbose);
    if let Err(e) = &file {
        warn!("{:#}; using defaults", e);
    }
    validate_opts(&opts)?;
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    let filters = Filters::load(&opts.filters)?;
    let text = ocr_document(&opts, &filters)?;
    write_output(opts.output.as_deref(), &text)
}
