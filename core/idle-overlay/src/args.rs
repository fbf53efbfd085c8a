//! Lenient argv parsing.
//!
//! The launcher contract is positional: session id, start time (fractional
//! epoch seconds), then the four rect coordinates. Trailing arguments are
//! best-effort: an unparsable start time becomes "now" and an incomplete
//! or malformed rect means screen-relative placement. Only a missing
//! session id is fatal, which is why this does not go through clap's
//! fail-fast parsing.

use idle_core::decision;
use idle_core::SavedRect;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayArgs {
    pub session_id: String,
    pub start_time: f64,
    pub rect: Option<SavedRect>,
}

pub fn parse(mut argv: impl Iterator<Item = String>) -> Option<OverlayArgs> {
    let session_id = argv.next().filter(|s| !s.is_empty())?;
    let rest: Vec<String> = argv.collect();

    let start_time = rest
        .first()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or_else(decision::epoch_seconds);

    let rect = if rest.len() >= 5 {
        parse_rect(&rest[1..5])
    } else {
        None
    };

    Some(OverlayArgs {
        session_id,
        start_time,
        rect,
    })
}

fn parse_rect(parts: &[String]) -> Option<SavedRect> {
    let mut vals = parts.iter().map(|s| s.parse::<i32>().ok());
    Some(SavedRect {
        left: vals.next()??,
        top: vals.next()??,
        right: vals.next()??,
        bottom: vals.next()??,
    })
}
