//! File-based logging for hook invocations.
//!
//! Hook stdout/stderr belong to Claude Code, so log lines go to a daily
//! rolling file under the signals directory instead. Returns a guard that
//! must live for the process so buffered lines are flushed on exit.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn init() -> Option<WorkerGuard> {
    let filter = if debug_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let signals_dir = idle_core::paths::signals_dir().ok()?;
    let logs_dir = idle_core::paths::logs_dir(&signals_dir);
    fs_err::create_dir_all(&logs_dir).ok()?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "idle-hook.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

fn debug_enabled() -> bool {
    std::env::var("IDLE_OVERLAY_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}
