//! Engine module for CLI-facing operations: arguments, extraction, rules, output.

pub mod arg_parser;
pub mod extract;
pub mod filters;
pub mod handlers;
pub mod output;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use extract::{extract_args, extract_images};
pub use filters::{Filters, Rule, unquote};
pub use handlers::{build_opts, handle_run, validate_opts};
pub use output::write_output;
pub use tools::{first_line, glob_match, trim_space, trim_space_end};
