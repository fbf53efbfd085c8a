//! Agent Teams exclusion filter.
//!
//! While a session is the lead of an Agent Teams run it is supervising
//! subagents, and an idle overlay would be visual noise. The Stop hook
//! scans the per-team config files and suppresses the overlay when this
//! session is declared as a team's `leadSessionId`.

use crate::error::{IdleError, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};

/// Returns the default teams directory (`~/.claude/teams`).
pub fn default_teams_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".claude").join("teams"))
        .ok_or(IdleError::HomeDirUnavailable)
}

/// Returns true if any `{teams_dir}/*/config.json` declares `session_id`
/// as its lead session. Unreadable or malformed configs are skipped.
pub fn is_lead_session(teams_dir: &Path, session_id: &str) -> bool {
    let entries = match fs::read_dir(teams_dir) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    for entry in entries.flatten() {
        let config_path = entry.path().join("config.json");
        let Ok(raw) = fs::read_to_string(&config_path) else {
            continue;
        };
        let Ok(config) = serde_json::from_str::<serde_json::Value>(&raw) else {
            tracing::debug!(path = %config_path.display(), "skipping malformed team config");
            continue;
        };
        if config.get("leadSessionId").and_then(|v| v.as_str()) == Some(session_id) {
            return true;
        }
    }

    false
}
