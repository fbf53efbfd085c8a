//! Stop sentinel, saved rect, and recorded PID: the three file artifacts
//! that bind hook invocations to a long-lived overlay process.
//!
//! The sentinel has existence-only semantics: writing it twice equals
//! writing it once, and whoever sees it first deletes it. Read/write races
//! between the prompt hook, the stop hook, and the overlay are resolved by
//! "existence at the check point wins"; no locks.

use crate::error::{IdleError, Result};
use crate::paths;
use fs_err as fs;
use std::path::Path;

/// Last known screen rectangle of the terminal window, in screen
/// coordinates. Persisted as comma-separated integers (`"L,T,R,B"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl SavedRect {
    pub fn encode(&self) -> String {
        format!("{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }

    /// Parses `"L,T,R,B"`. Anything malformed yields `None` (the overlay
    /// falls back to screen-relative placement), never an error.
    pub fn parse(raw: &str) -> Option<SavedRect> {
        let mut parts = raw.trim().split(',');
        let mut next = || parts.next()?.trim().parse::<i32>().ok();
        let rect = SavedRect {
            left: next()?,
            top: next()?,
            right: next()?,
            bottom: next()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(rect)
    }
}

// ---------------------------------------------------------------------------
// Stop sentinel
// ---------------------------------------------------------------------------

/// Writes the stop sentinel for a session, creating the signals directory
/// if needed. Content is irrelevant; existence is the signal.
pub fn write_stop_sentinel(signals_dir: &Path, session_id: &str) -> Result<()> {
    fs::create_dir_all(signals_dir)
        .map_err(|e| IdleError::io("create signals directory", e))?;
    fs::write(paths::stop_sentinel_path(signals_dir, session_id), "stop")
        .map_err(|e| IdleError::io("write stop sentinel", e))?;
    Ok(())
}

pub fn stop_sentinel_present(signals_dir: &Path, session_id: &str) -> bool {
    paths::stop_sentinel_path(signals_dir, session_id).exists()
}

/// Consumes the sentinel: returns true if it existed, deleting it on the
/// way. The deletion is best-effort; losing the race to another consumer
/// is fine.
pub fn consume_stop_sentinel(signals_dir: &Path, session_id: &str) -> bool {
    let path = paths::stop_sentinel_path(signals_dir, session_id);
    if !path.exists() {
        return false;
    }
    let _ = fs::remove_file(&path);
    true
}

/// Removes any sentinel without reporting whether one existed.
pub fn clear_stop_sentinel(signals_dir: &Path, session_id: &str) {
    let _ = fs::remove_file(paths::stop_sentinel_path(signals_dir, session_id));
}

// ---------------------------------------------------------------------------
// Saved rect
// ---------------------------------------------------------------------------

pub fn save_rect(signals_dir: &Path, session_id: &str, rect: SavedRect) -> Result<()> {
    fs::create_dir_all(signals_dir)
        .map_err(|e| IdleError::io("create signals directory", e))?;
    fs::write(paths::rect_path(signals_dir, session_id), rect.encode())
        .map_err(|e| IdleError::io("write saved rect", e))?;
    Ok(())
}

/// Loads the saved rect for a session. Absent or malformed content yields
/// `None`; stale values are acceptable (the terminal rarely moves between
/// prompt and overlay launch).
pub fn load_rect(signals_dir: &Path, session_id: &str) -> Option<SavedRect> {
    let raw = fs::read_to_string(paths::rect_path(signals_dir, session_id)).ok()?;
    SavedRect::parse(&raw)
}

// ---------------------------------------------------------------------------
// Window identity
// ---------------------------------------------------------------------------

/// Win32 window class registered by the overlay for a session. The stop
/// hook discovers a previous overlay by this class name, which beats a
/// recorded PID (PIDs get reused; a findable window is certainly ours).
pub fn overlay_window_class(session_id: &str) -> String {
    format!("IdleOverlay_{session_id}")
}

// ---------------------------------------------------------------------------
// Recorded overlay PID
// ---------------------------------------------------------------------------

pub fn record_overlay_pid(signals_dir: &Path, session_id: &str, pid: u32) -> Result<()> {
    fs::create_dir_all(signals_dir)
        .map_err(|e| IdleError::io("create signals directory", e))?;
    fs::write(paths::pid_path(signals_dir, session_id), pid.to_string())
        .map_err(|e| IdleError::io("write overlay pid", e))?;
    Ok(())
}

pub fn read_overlay_pid(signals_dir: &Path, session_id: &str) -> Option<u32> {
    let raw = fs::read_to_string(paths::pid_path(signals_dir, session_id)).ok()?;
    raw.trim().parse().ok()
}

pub fn clear_overlay_pid(signals_dir: &Path, session_id: &str) {
    let _ = fs::remove_file(paths::pid_path(signals_dir, session_id));
}
