use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

const MAX_LOG_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);

#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

/// Install the global subscriber: stderr always, plus a daily-rolling file
/// under `log_dir` when one is given.
pub fn init_logging(log_dir: Option<&Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let (default_level, valid_level) = match level.parse::<LevelFilter>() {
        Ok(parsed) => (parsed, true),
        Err(_) => (LevelFilter::INFO, false),
    };

    let builder = EnvFilter::builder().with_default_directive(default_level.into());
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);

    let mut guard = None;
    let file_layer = match log_dir {
        Some(log_dir) => {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .build(log_dir)?;
            let (non_blocking, worker_guard) = NonBlocking::new(file_appender);
            guard = Some(worker_guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(builder.parse_lossy(&rust_log)),
            )
        }
        None => None,
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    if !valid_level {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    if let Some(log_dir) = log_dir {
        match prune_old_logs(log_dir, prefix, MAX_LOG_AGE) {
            Ok(removed) if removed > 0 => tracing::info!("Removed {} old log files", removed),
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
        }
    }

    Ok(LoggerGuard(guard))
}

/// Delete `<prefix>*.log` files in `log_dir` last modified more than `max_age` ago.
pub fn prune_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let metadata = fs::metadata(&path)?;
                if let Ok(modified) = metadata.modified() {
                    if now.duration_since(modified).unwrap_or_default() > max_age {
                        fs::remove_file(&path)?;
                        removed += 1;
                    }
                }
            }
        }
    }
    Ok(removed)
}
