//! # idle-core
//!
//! Core library for the Claude Code idle overlay: the file-based signaling
//! contract between the hook commands and the overlay process, plus the
//! decision logic the Stop hook runs before launching an overlay.
//!
//! ## Design Principles
//!
//! - **Synchronous**: no async runtime; hooks are short-lived processes.
//! - **Fail open**: missing or malformed files return defaults, not errors.
//!   Hooks must never disturb the host assistant's main flow.
//! - **Injected paths**: all functions take explicit base directories so
//!   tests run against temp dirs. Only [`paths::signals_dir`] and
//!   [`teams::default_teams_dir`] touch the real home directory.
//!
//! ## Coordination model
//!
//! Three processes share nothing but the filesystem and the process table:
//!
//! ```text
//! UserPromptSubmit → idle-hook prompt → stop sentinel + saved rect
//! Stop             → idle-hook stop   → decision::decide → spawn idle-overlay
//! idle-overlay     → polls the stop sentinel, exits on sentinel or click
//! ```

pub mod decision;
pub mod error;
pub mod format;
pub mod hook_input;
pub mod paths;
pub mod process;
pub mod signal;
pub mod teams;

pub use error::{IdleError, Result};
pub use hook_input::HookInput;
pub use signal::SavedRect;
