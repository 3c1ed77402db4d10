use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const DEFAULT_FILTER: &str = "rxview=info";

/// Keeps the background log writer alive; logs are flushed when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// `None` when logging to stderr.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Installs the global subscriber. Returns `None` when one is already set or
/// the log directory cannot be created.
///
/// `RUST_LOG` overrides the configured filter.
pub fn init(config: &LoggingConfig) -> Option<LoggingGuard> {
    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).ok()?;
            let file_appender = tracing_appender::rolling::daily(dir, &config.file_name);
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        previous_hook(panic_info);
    }));

    match &config.log_dir {
        Some(dir) => tracing::info!(log_dir = %dir.display(), "tracing initialized"),
        None => tracing::info!("tracing initialized"),
    }

    Some(LoggingGuard {
        _guard: guard,
        log_dir: config.log_dir.clone(),
    })
}
