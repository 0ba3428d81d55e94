use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::MAX_PAGES;

/// Extract text from a scanned PDF document.
#[derive(Clone, Debug, Parser)]
#[command(name = "ocrpdf", version)]
#[command(about = "Extract text from a scanned PDF document FILE.")]
pub struct Cli {
    /// Document to extract text from.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// First page number.
    #[arg(long, short = 'f', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES as i64))]
    pub first: u32,

    /// Last page number. Default: last page of the document.
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES as i64))]
    pub last: Option<u32>,

    /// Rule file with text substitutions. May be given multiple times.
    #[arg(long = "filter", short = 'F', value_name = "FILE")]
    pub filters: Vec<PathBuf>,

    /// Document language passed to the recognizer. Default: `eng` (or `.ocrpdf.toml`).
    #[arg(long, short = 'L', value_name = "LANG")]
    pub language: Option<String>,

    /// Output file name. Default: stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker thread count. Default: available threads.
    #[arg(long, short = 'j', value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Verbose output: debug logging and a progress bar.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
