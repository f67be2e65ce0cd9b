use std::fs;
use std::path::{Path, PathBuf};
use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log verbosity accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Default log file used by the TUI, next to the other application data.
pub fn default_log_path() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("todoust");
    p.push("todoust.log");
    p
}

fn filter(level: Level) -> EnvFilter {
    // RUST_LOG wins over the command line level
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,todoust={}", level)))
}

/// Logs to stderr. Used by the one-shot CLI commands.
pub fn init_stderr(level: LogLevel) -> anyhow::Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter(level.into()))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Logs to a file. The TUI owns the terminal, so its logs can't go to stderr.
pub fn init_file(level: LogLevel, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);
    tracing_subscriber::registry()
        .with(filter(level.into()))
        .with(layer)
        .try_init()?;
    Ok(())
}
