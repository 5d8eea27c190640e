//! File logging for diagnostics.
//!
//! The TUI owns stdout and stderr while a race runs, so records go to
//! `typrace.log` in the state directory instead. Nothing is installed
//! unless `RUST_LOG` is set.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::app_dirs::AppDirs;

pub fn init() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    match AppDirs::log_path() {
        Some(path) => init_to(&path),
        None => Ok(()),
    }
}

/// Install the global logger writing to `path`. Later calls are no-ops.
pub fn init_to(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = Builder::from_env(Env::default().default_filter_or("typrace=info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}
