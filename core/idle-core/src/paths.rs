//! Artifact paths for the signaling protocol.
//!
//! Everything the hooks and the overlay exchange lives in one per-user
//! signals directory, namespaced by session id:
//!
//! ```text
//! ~/.claude/idle-overlay/
//! ├── stop-{session}    close any overlay for this session (existence-only)
//! ├── rect-{session}    last known terminal rect, "L,T,R,B"
//! ├── pid-{session}     PID of the most recently launched overlay
//! └── logs/             hook log files
//! ```
//!
//! Artifacts may leak across crashes; every reader tolerates stale or
//! missing files.

use crate::error::{IdleError, Result};
use std::path::{Path, PathBuf};

/// Returns the default signals directory (`~/.claude/idle-overlay`).
///
/// Binaries resolve this once at startup; library code takes the resolved
/// directory as a parameter so tests can substitute a temp dir.
pub fn signals_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".claude").join("idle-overlay"))
        .ok_or(IdleError::HomeDirUnavailable)
}

pub fn stop_sentinel_path(signals_dir: &Path, session_id: &str) -> PathBuf {
    signals_dir.join(format!("stop-{session_id}"))
}

pub fn rect_path(signals_dir: &Path, session_id: &str) -> PathBuf {
    signals_dir.join(format!("rect-{session_id}"))
}

pub fn pid_path(signals_dir: &Path, session_id: &str) -> PathBuf {
    signals_dir.join(format!("pid-{session_id}"))
}

pub fn logs_dir(signals_dir: &Path) -> PathBuf {
    signals_dir.join("logs")
}
