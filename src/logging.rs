//! Log setup. The play mode owns the terminal, so it logs to a file;
//! headless runs log to stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Where log records go
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

pub fn init_logging(target: LogTarget<'_>, verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {} {} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level);

    let dispatch = match target {
        LogTarget::Stderr => dispatch.chain(std::io::stderr()),
        LogTarget::File(path) => dispatch.chain(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
    };

    dispatch.apply().context("Logging initialization failed")?;
    log::debug!("Logging at {}", level);
    Ok(())
}
