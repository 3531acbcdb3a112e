use std::path::{Path, PathBuf};

// Re-export logging functions for convenience.
pub use log::*;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{runtime::ConfigErrors, Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Records below this level are discarded.
    pub level: LevelFilter,
    /// Directory receiving one log file per run. `None` disables file logging.
    pub directory: Option<PathBuf>,
    /// Mirror records to stdout.
    pub console: bool,
}

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("unable to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid logging configuration: {0}")]
    Config(#[from] ConfigErrors),
    #[error("a logger is already installed: {0}")]
    SetLogger(#[from] SetLoggerError),
    #[error("unable to parse log settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl LogSettings {
    pub fn from_ron(src: &str) -> Result<Self, LogInitError> {
        Ok(ron::from_str(src)?)
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            directory: Some(PathBuf::from("./logs")),
            console: true,
        }
    }
}

/// Initializes logging. Should be called before any other logging functions. Provided
/// `LevelFilter` will remove all logs below the provided level.
pub fn init(filter: LevelFilter) -> Result<(), LogInitError> {
    init_with(&LogSettings {
        level: filter,
        ..Default::default()
    })
}

/// Initializes logging with explicit settings.
pub fn init_with(settings: &LogSettings) -> Result<(), LogInitError> {
    let mut config = Config::builder();
    let mut root = Root::builder();

    if settings.console {
        let stdout = ConsoleAppender::builder().build();
        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(directory) = &settings.directory {
        // Name of the file is based on the current time.
        let log_file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} - {l} - {m}{n}")))
            .build(log_file_path(directory, chrono::Utc::now()))?;
        config = config
            .appender(Appender::builder().build("log_file", Box::new(log_file)))
            .logger(
                Logger::builder()
                    .appender("log_file")
                    .additive(false)
                    .build("app::log_file", settings.level),
            );
        root = root.appender("log_file");
    }

    let config = config.build(root.build(settings.level))?;
    log4rs::init_config(config)?;

    log_panics::init();

    Ok(())
}

fn log_file_path(directory: &Path, now: chrono::DateTime<chrono::Utc>) -> PathBuf {
    directory.join(format!("{}.txt", now.format("%Y-%m-%d %H-%M-%S")))
}
