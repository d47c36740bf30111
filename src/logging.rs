use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::Result;

/// Install the process-wide file logger. Appends to `path`, creating the
/// parent directory. Only the first call in a process takes effect.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    // a logger may already be set (tests, embedding apps)
    let _ = WriteLogger::init(level, config, file);
    Ok(())
}
