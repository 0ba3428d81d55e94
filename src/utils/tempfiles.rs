//! Scoped work directory for extracted page images.
//!
//! The directory is removed on every exit path: explicit [`WorkDir::release`], drop, or
//! the Ctrl+C handler installed by [`WorkDir::release_on_interrupt`]. Release is idempotent
//! and may race with running workers; they are abandoned, not drained.

use anyhow::{Context, Result};
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::utils::config::PackagePaths;

type Slot = Arc<Mutex<Option<TempDir>>>;

pub struct WorkDir {
    slot: Slot,
    path: PathBuf,
}

/// Take the directory out of the slot (first caller wins) and delete it.
fn release_slot(slot: &Slot) -> std::io::Result<bool> {
    let taken = match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    match taken {
        Some(dir) => dir.close().map(|_| true),
        None => Ok(false),
    }
}

impl WorkDir {
    /// Create a fresh temp directory named with the package prefix.
    pub fn acquire() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PackagePaths::get().workdir_prefix())
            .tempdir()
            .context("create temporary work directory")?;
        let path = dir.path().to_path_buf();
        debug!("Work directory: {}", path.display());
        Ok(Self {
            slot: Arc::new(Mutex::new(Some(dir))),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the directory has been released.
    pub fn is_held(&self) -> bool {
        match self.slot.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    /// Remove the directory. Later calls are no-ops.
    pub fn release(&self) -> Result<()> {
        if release_slot(&self.slot)
            .with_context(|| format!("remove work directory {}", self.path.display()))?
        {
            debug!("Removed work directory {}", self.path.display());
        }
        Ok(())
    }

    /// Install a Ctrl+C / SIGTERM handler that removes the directory and exits with status 1.
    /// Only one handler can be installed per process.
    pub fn release_on_interrupt(&self) -> Result<()> {
        let slot = Arc::clone(&self.slot);
        ctrlc::set_handler(move || {
            let _ = release_slot(&slot);
            error!("Interrupted");
            std::process::exit(1);
        })
        .context("set Ctrl+C handler")
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        let _ = release_slot(&self.slot);
    }
}
