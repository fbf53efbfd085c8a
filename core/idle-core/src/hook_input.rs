//! Hook payload parsing.
//!
//! Claude Code delivers a JSON object on stdin for every hook invocation.
//! The idle overlay only cares about two fields; everything else is
//! ignored. Parsing is fail-open: empty or malformed input yields `None`
//! and the hook exits successfully with no side effects, because a broken
//! payload must never block prompt submission.

use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
}

impl HookInput {
    /// Parses a raw hook payload. Empty or malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<HookInput> {
        if raw.trim().is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok()
    }

    /// The session id, if present and non-empty.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Reads stdin to exhaustion and parses the payload. Read failures are
/// treated the same as malformed input.
pub fn read_from(reader: &mut impl Read) -> Option<HookInput> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw).ok()?;
    HookInput::parse(&raw)
}
