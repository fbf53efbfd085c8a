//! Stop hook: decide whether this Stop event is a genuine idle point and,
//! if so, launch the overlay process for the session.
//!
//! Order matters: the team filter runs first (cheap, no side effects),
//! then any previous overlay for the session is asked to close (one
//! overlay per session), then the debounced idle check decides whether a
//! replacement gets launched at all.

use idle_core::decision::{self, StopVerdict};
use idle_core::{hook_input, paths, process, signal, teams, IdleError, Result, SavedRect};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

const OVERLAY_BIN: &str = "idle-overlay";

pub fn run() -> Result<()> {
    let Some(input) = hook_input::read_from(&mut io::stdin()) else {
        return Ok(());
    };
    let Some(session_id) = input.session_id() else {
        tracing::debug!("Skipping stop hook (missing session_id)");
        return Ok(());
    };

    let teams_dir = teams::default_teams_dir()?;
    if teams::is_lead_session(&teams_dir, session_id) {
        tracing::debug!(session = %session_id, "Suppressing overlay (team lead session)");
        return Ok(());
    }

    let signals_dir = paths::signals_dir()?;
    close_previous_overlay(&signals_dir, session_id);

    let transcript_path = input.transcript_path.as_deref().map(Path::new);
    match decision::decide(&signals_dir, session_id, transcript_path, thread::sleep) {
        StopVerdict::NewPrompt => {
            tracing::debug!(session = %session_id, "No overlay (prompt arrived during settle wait)");
        }
        StopVerdict::StillWorking => {
            tracing::debug!(session = %session_id, "No overlay (transcript still growing)");
        }
        StopVerdict::Launch { start_time, rect } => {
            launch_overlay(&signals_dir, session_id, start_time, rect)?;
        }
    }

    Ok(())
}

/// Asks any previous overlay for this session to terminate. Window
/// identity is checked before the recorded PID: a window we can find is
/// certainly ours, while a recorded PID may have been reused since.
fn close_previous_overlay(signals_dir: &Path, session_id: &str) {
    if close_overlay_window(session_id) {
        tracing::debug!(session = %session_id, "Close posted to previous overlay window");
        signal::clear_overlay_pid(signals_dir, session_id);
        return;
    }

    if let Some(pid) = signal::read_overlay_pid(signals_dir, session_id) {
        if process::looks_like_overlay(pid, OVERLAY_BIN) {
            if process::request_terminate(pid) {
                tracing::debug!(session = %session_id, pid, "Previous overlay signaled");
            } else {
                tracing::warn!(session = %session_id, pid, "Failed to signal previous overlay");
            }
        }
        // Never signal the same recorded PID twice; it may get reused.
        signal::clear_overlay_pid(signals_dir, session_id);
    }
}

#[cfg(windows)]
fn close_overlay_window(session_id: &str) -> bool {
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{LPARAM, WPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, PostMessageW, WM_CLOSE};

    let class: Vec<u16> = signal::overlay_window_class(session_id)
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();

    unsafe {
        let Ok(hwnd) = FindWindowW(PCWSTR(class.as_ptr()), PCWSTR::null()) else {
            return false;
        };
        if hwnd.0.is_null() {
            return false;
        }
        PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)).is_ok()
    }
}

#[cfg(not(windows))]
fn close_overlay_window(_session_id: &str) -> bool {
    false
}

fn launch_overlay(
    signals_dir: &Path,
    session_id: &str,
    start_time: f64,
    rect: Option<SavedRect>,
) -> Result<()> {
    let program = overlay_binary_path();
    let mut command = Command::new(&program);
    command.args(decision::overlay_argv(session_id, start_time, rect));
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        command.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
    }

    let child = command.spawn().map_err(|source| IdleError::Launch {
        program: program.clone(),
        source,
    })?;

    if let Err(e) = signal::record_overlay_pid(signals_dir, session_id, child.id()) {
        tracing::warn!(error = %e, session = %session_id, "Failed to record overlay pid");
    }
    tracing::info!(session = %session_id, pid = child.id(), "Overlay launched");
    Ok(())
}

/// The overlay binary ships alongside the hook binary.
fn overlay_binary_path() -> PathBuf {
    let name = format!("{OVERLAY_BIN}{}", std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .unwrap_or_else(|| PathBuf::from(name))
}
