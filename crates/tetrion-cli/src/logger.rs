use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write as _},
    path::Path,
    sync::Mutex,
};

use anyhow::Context;
use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record};

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Appends log records to a file.
///
/// The terminal belongs to the game screen, so records never go to stdout or
/// stderr.
#[derive(Debug)]
pub struct FileLogger {
    level: LevelFilter,
    writer: Mutex<BufWriter<File>>,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        Ok(Self {
            level,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        // A failing log write has nowhere to be reported
        let _ = writeln!(
            writer,
            "{} {:<5} {}: {}",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            record.level(),
            record.target(),
            record.args()
        )
        .and_then(|()| writer.flush());
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Installs the global logger.
///
/// Without a log file, logging stays disabled.
pub fn init(path: Option<&Path>, level: LogLevel) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let level = LevelFilter::from(level);
    let logger = FileLogger::open(path, level)?;
    log::set_logger(Box::leak(Box::new(logger)))
        .map_err(|err| anyhow::anyhow!("Logger already initialized: {err}"))?;
    log::set_max_level(level);
    Ok(())
}
