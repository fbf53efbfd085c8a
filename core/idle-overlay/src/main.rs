//! idle-overlay: always-on-top timer showing how long Claude Code has been
//! waiting for the user.
//!
//! ```text
//! idle-overlay <session_id> [start_time] [left top right bottom]
//! ```
//!
//! Spawned detached by `idle-hook stop` on a genuine idle point. Exits on
//! a primary click anywhere on the window, or when the session's stop
//! sentinel appears (written by `idle-hook prompt` or by the next stop
//! hook replacing this overlay).

mod args;
mod logging;
mod placement;
mod window;

use idle_core::{paths, signal};

fn main() {
    let _logging_guard = logging::init();

    let Some(parsed) = args::parse(std::env::args().skip(1)) else {
        // Without a session id there is no sentinel to watch; the process
        // has no purpose.
        std::process::exit(1);
    };

    let signals_dir = match paths::signals_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!(error = %e, "Cannot resolve signals directory");
            std::process::exit(1);
        }
    };

    // A sentinel left over from a previous run would kill this instance
    // on the first poll tick.
    signal::clear_stop_sentinel(&signals_dir, &parsed.session_id);

    tracing::debug!(
        session = %parsed.session_id,
        start_time = parsed.start_time,
        rect = ?parsed.rect,
        "Overlay starting"
    );

    if let Err(e) = window::run(&signals_dir, &parsed) {
        tracing::error!(error = %e, session = %parsed.session_id, "Overlay window failed");
        std::process::exit(1);
    }
}
