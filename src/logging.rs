use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_STDOUT_DIRECTIVES: &str = "info,jobwatch=debug";

/// Install the stdout and append-only file loggers.
///
/// Stdout defaults to `debug` for this crate and `info` for dependencies,
/// and honours `RUST_LOG`; the log file always records `info` and above.
pub fn init(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDOUT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(stdout_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(LevelFilter::INFO),
        )
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_quiet_dependencies() {
        let filter = EnvFilter::new(DEFAULT_STDOUT_DIRECTIVES);
        let rendered = filter.to_string();
        assert!(rendered.contains("jobwatch=debug"));
        assert!(rendered.contains("info"));
        assert!(!rendered.contains("reqwest"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
