use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write the final text to `path` (created or truncated), or to stdout when None.
pub fn write_output(path: Option<&Path>, text: &[u8]) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, text).with_context(|| format!("write {}", p.display())),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(text).context("write to stdout")?;
            out.flush().context("flush stdout")
        }
    }
}
