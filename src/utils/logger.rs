use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the stderr logger. Dependencies log at Warn; ocrpdf at Info, or Debug when `verbose`.
/// `RUST_LOG` still overrides both.
///
/// Errors and warnings read as one-line diagnostics (`ocrpdf: error: ...`); debug lines carry
/// the pipeline stage they came from.
pub fn setup_logging(verbose: bool) {
    let name = env!("CARGO_PKG_NAME");
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // try_init: ocr_document may run several times in one process (lib callers, tests).
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(name, level)
        .format(move |buf, record| match record.level() {
            Level::Error => {
                let tag = "error:".red().bold();
                writeln!(buf, "{}: {} {}", name.cyan(), tag, record.args())
            }
            Level::Warn => {
                let tag = "warning:".yellow();
                writeln!(buf, "{}: {} {}", name.cyan(), tag, record.args())
            }
            Level::Info => writeln!(buf, "{}: {}", name.cyan(), record.args()),
            Level::Debug | Level::Trace => {
                let stage = record.target().rsplit("::").next().unwrap_or_default();
                writeln!(buf, "{} {}", format!("[{stage}]").dimmed(), record.args())
            }
        })
        .try_init();
}
