//! ocrpdf CLI: extract text from a scanned PDF document.

use clap::Parser;
use ocrpdf::engine::arg_parser::Cli;
use ocrpdf::engine::handle_run;
use std::time::Instant;

fn main() {
    let start_time = Instant::now();
    let cli = Cli::parse();
    if let Err(e) = handle_run(&cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
    log::debug!("Total time: {:?}", start_time.elapsed());
}
