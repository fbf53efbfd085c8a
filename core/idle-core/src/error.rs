//! Error types for idle-core operations.
//!
//! Callers in the hook binaries log these and exit 0; nothing here should
//! ever surface to the host process as a failure.

use std::path::PathBuf;

/// All errors that can occur in idle-core operations.
#[derive(Debug, thiserror::Error)]
pub enum IdleError {
    #[error("Cannot determine home directory")]
    HomeDirUnavailable,

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Overlay launch failed: {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IdleError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        IdleError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdleError>;
