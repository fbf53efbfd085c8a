//! idle-hook: Claude Code hook commands for the idle overlay.
//!
//! Configured in `~/.claude/settings.json`:
//!
//! - `prompt`: UserPromptSubmit hook. Signals any visible overlay for the
//!   session to close and saves the terminal window rect.
//! - `stop`: Stop hook. Waits out transient pauses, then launches the
//!   overlay process if the session is genuinely idle.
//!
//! Both commands read a JSON payload from stdin and always exit 0; a hook
//! failure must never surface to Claude Code.

mod foreground;
mod logging;
mod prompt;
mod stop;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "idle-hook")]
#[command(about = "Idle overlay hook handler for Claude Code")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle UserPromptSubmit (reads JSON from stdin)
    Prompt,

    /// Handle Stop (reads JSON from stdin)
    Stop,
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Prompt => prompt::run(),
        Commands::Stop => stop::run(),
    };

    // Errors are logged and swallowed; the exit code stays 0.
    if let Err(e) = result {
        tracing::warn!(error = %e, "idle-hook finished with error (ignored)");
    }
}
