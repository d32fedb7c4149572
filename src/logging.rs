use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DebugLogRotation};

const LOG_FILE_NAME: &str = "bocha-search-debug.log";

/// Keeps the non-blocking file writer alive; drop it last.
#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initialize logging.
///
/// With `debug` enabled, logs go to `<config_dir>/bocha-search/bocha-search-debug.log`
/// (or `debug_log_path`). Otherwise warnings go to stderr, filtered by `RUST_LOG`.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // If already initialized (e.g., in tests), don't crash.
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::None);
    let path = resolve_log_path(config.debug_log_path.as_deref())?;
    let (dir, file_name) = split_dir_and_name(&path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = match rotation {
        DebugLogRotation::None => tracing_appender::rolling::never(&dir, &file_name),
        DebugLogRotation::Daily => {
            // tracing_appender::rolling::daily names files `{file_name}.{YYYY-MM-DD}`
            prune_daily_logs(&dir, &file_name, config.debug_log_keep.unwrap_or(7))?;
            tracing_appender::rolling::daily(&dir, &file_name)
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new("bocha_search=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok();

    tracing::info!(log_file = %path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn resolve_log_path(configured: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = configured else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Remove all but the newest `keep` daily files. `keep == 0` keeps everything.
fn prune_daily_logs(dir: &Path, file_name: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let prefix = format!("{file_name}.");
    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(&prefix) {
                candidates.push(name.to_string());
            }
        }
    }

    // Date suffixes sort lexicographically; newest first.
    candidates.sort_unstable_by(|a, b| b.cmp(a));

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}
