//! Tracing subscriber setup.
//!
//! The interactive viewer owns the terminal, so it only logs when a log
//! file is configured. One-shot mode logs to stderr, which keeps stdout
//! clean for the printed output.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// `RUST_LOG` if set, otherwise the configured filter.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone());
    EnvFilter::builder().parse_lossy(directives)
}

pub fn init(config: &LogConfig, interactive: bool) -> Result<(), anyhow::Error> {
    let filter = env_filter(config);
    let builder = tracing_subscriber::fmt().compact().with_env_filter(filter);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", path.display(), e))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if interactive => builder.with_writer(io::sink).try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LogConfig {
            filter: "convo_viewer=debug".to_string(),
            file: None,
        };
        assert_eq!(env_filter(&config).to_string(), "convo_viewer=debug");
    }
}
