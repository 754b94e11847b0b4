//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Resolve the platform-specific Edda log directory for host shells.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and directory.
//! - Re-initialization with a different level or directory is rejected.
//! - Logging initialization must not panic.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "edda";
const MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Initializes core logging with level and directory.
///
/// Returns `Ok(())` when logging is active, or a human-readable error
/// string when initialization fails.
///
/// # Invariants
/// - Repeat calls with the same `level + log_dir` are idempotent.
/// - Repeat calls with a different level or directory are rejected.
/// - Never panics.
///
/// # Errors
/// - Unsupported `level`.
/// - Empty or relative `log_dir`, or a directory that cannot be created.
/// - Logger backend setup failure.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    let init_dir = log_dir.clone();
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        std::fs::create_dir_all(&init_dir).map_err(|err| {
            format!("failed to create log directory `{}`: {err}", init_dir.display())
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(FileSpec::default().directory(init_dir.as_path()).basename(LOG_BASENAME))
            .rotate(
                Criterion::Size(MAX_LOG_FILE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_ROTATED_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook_once();

        info!(
            "event=core_init module=core status=ok level={} log_dir={} version={}",
            level,
            init_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir: init_dir,
            _logger: logger,
        })
    })?;

    // A lost init race or a repeat call must still match the active config.
    if state.log_dir != log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` when logging is active, `None` otherwise.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Resolves the conventional Edda log directory for this platform.
///
/// - Linux: `~/.local/share/edda`
/// - macOS: `~/Library/Logs/Edda`
/// - Windows: `%APPDATA%\edda`
///
/// Returns `None` when the required environment variable is missing.
pub fn default_log_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join("Library/Logs/Edda"))
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var_os("APPDATA")?;
        Some(Path::new(&appdata).join("edda"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".local/share/edda"))
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        // Panic payloads can carry document text; cap and flatten before
        // logging.
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    // The logger handle lives in process-wide state, so these tests cannot
    // hand the directory to tempfile for cleanup.
    fn scratch_log_dir(tag: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("edda-log-{tag}-{}-{stamp}", std::process::id()))
    }

    #[test]
    fn level_names_normalize_case_padding_and_aliases() {
        assert_eq!(normalize_level("Error").unwrap(), "error");
        assert_eq!(normalize_level("  TRACE").unwrap(), "trace");
        assert_eq!(normalize_level("warning"), normalize_level("warn"));

        let message = normalize_level("verbose").expect_err("not a level name");
        assert!(message.contains("trace|debug|info|warn|error"));
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert!(normalize_log_dir("   ").is_err());
        assert!(normalize_log_dir("logs/dev").is_err());
        assert_eq!(
            normalize_log_dir(" /var/tmp/edda ").expect("absolute path accepted"),
            PathBuf::from("/var/tmp/edda")
        );
    }

    #[test]
    fn default_log_dir_is_edda_scoped_when_resolvable() {
        if let Some(dir) = default_log_dir() {
            let lower = dir.to_string_lossy().to_ascii_lowercase();
            assert!(lower.contains("edda"));
        }
    }

    #[test]
    fn panic_payloads_are_flattened_and_capped() {
        let payload = "unsaved chapter text\r\nmore text".repeat(12);
        let sanitized = sanitize_message(&payload, 24);

        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert_eq!(sanitized.chars().count(), 24 + "...".len());

        let short = sanitize_message("fits", 24);
        assert_eq!(short, "fits");
    }

    #[test]
    fn repeat_init_keeps_the_first_configuration() {
        let first = scratch_log_dir("first");
        let other = scratch_log_dir("other");
        let first_str = first.to_str().expect("utf-8 temp path");
        let other_str = other.to_str().expect("utf-8 temp path");

        init_logging("info", first_str).expect("initial init");
        init_logging(" INFO ", first_str).expect("same config under other spelling");

        let level_conflict = init_logging("error", first_str).expect_err("level conflict");
        assert!(level_conflict.contains("refusing to switch"));
        let dir_conflict = init_logging("info", other_str).expect_err("directory conflict");
        assert!(dir_conflict.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(dir, first);
    }
}
