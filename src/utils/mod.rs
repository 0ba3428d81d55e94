pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod ocrpdf_toml;
pub mod tempfiles;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit};
pub use logger::setup_logging;
pub use ocrpdf_toml::{OcrpdfToml, apply_file_to_opts, load_ocrpdf_toml, parse_ocrpdf_toml};
pub use tempfiles::WorkDir;
