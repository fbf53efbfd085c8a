//! UserPromptSubmit hook: close any running overlay and save the
//! terminal window position for the next launch.

use crate::foreground;
use idle_core::{hook_input, paths, signal, Result};
use std::io;

pub fn run() -> Result<()> {
    let Some(input) = hook_input::read_from(&mut io::stdin()) else {
        return Ok(());
    };
    let Some(session_id) = input.session_id() else {
        tracing::debug!("Skipping prompt hook (missing session_id)");
        return Ok(());
    };

    let signals_dir = paths::signals_dir()?;

    // Existence is the signal; the overlay's 200ms poll picks it up.
    signal::write_stop_sentinel(&signals_dir, session_id)?;
    tracing::debug!(session = %session_id, "Stop sentinel written");

    match foreground::capture_rect() {
        Some(rect) => {
            if let Err(e) = signal::save_rect(&signals_dir, session_id, rect) {
                tracing::warn!(error = %e, session = %session_id, "Failed to save terminal rect");
            }
        }
        None => {
            tracing::debug!(session = %session_id, "No foreground rect available");
        }
    }

    Ok(())
}
