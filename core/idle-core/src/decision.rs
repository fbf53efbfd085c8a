//! Debounced idle detection for the Stop hook.
//!
//! Claude Code fires a Stop event between internal steps too, not only at
//! a true end of turn. Launching an overlay on every Stop would flash
//! widgets during multi-step responses, so the hook waits a short settle
//! delay and only launches when neither of two "still busy" signals
//! appeared during the wait:
//!
//! 1. the stop sentinel reappeared (the user submitted a new prompt), or
//! 2. the transcript file grew (the assistant produced more output).
//!
//! The wait is injected so tests can interleave sentinel writes and
//! transcript growth without sleeping.

use crate::signal::{self, SavedRect};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How long a Stop event must stay quiet before it counts as idle.
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Outcome of the post-Stop settle window.
#[derive(Debug, Clone, PartialEq)]
pub enum StopVerdict {
    /// A new prompt arrived during the wait; the user already responded.
    NewPrompt,
    /// The transcript grew during the wait; the assistant is still working.
    StillWorking,
    /// Genuinely idle: show the overlay.
    Launch {
        /// Epoch seconds at the moment the settle wait began. Passed to the
        /// overlay so the displayed timer covers the whole idle period.
        start_time: f64,
        /// Terminal rect saved at prompt time, if any.
        rect: Option<SavedRect>,
    },
}

/// Current wall-clock time as fractional epoch seconds (the overlay's argv
/// start-time encoding).
pub fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Size of the transcript file, or 0 when it is absent or unreadable.
pub fn transcript_size(transcript_path: Option<&Path>) -> u64 {
    transcript_path
        .and_then(|p| fs_err::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0)
}

/// Positional argv for launching the overlay (after the program name):
/// session id, fractional start time, then the rect coordinates if a
/// terminal rect was saved. The overlay parses this tail leniently.
pub fn overlay_argv(session_id: &str, start_time: f64, rect: Option<SavedRect>) -> Vec<String> {
    let mut argv = vec![session_id.to_string(), format!("{start_time:.3}")];
    if let Some(rect) = rect {
        argv.extend([
            rect.left.to_string(),
            rect.top.to_string(),
            rect.right.to_string(),
            rect.bottom.to_string(),
        ]);
    }
    argv
}

/// Runs the debounced idle check for one Stop event.
///
/// Any sentinel left over from prompt time is cleared before the wait
/// begins, so only a prompt submitted *during* the wait aborts the launch.
/// A sentinel found after the wait is consumed here; the overlay it was
/// meant for no longer exists.
pub fn decide(
    signals_dir: &Path,
    session_id: &str,
    transcript_path: Option<&Path>,
    wait: impl FnOnce(Duration),
) -> StopVerdict {
    signal::clear_stop_sentinel(signals_dir, session_id);
    let size_before = transcript_size(transcript_path);
    let start_time = epoch_seconds();

    wait(SETTLE_DELAY);

    if signal::consume_stop_sentinel(signals_dir, session_id) {
        return StopVerdict::NewPrompt;
    }
    if transcript_size(transcript_path) > size_before {
        return StopVerdict::StillWorking;
    }

    StopVerdict::Launch {
        start_time,
        rect: signal::load_rect(signals_dir, session_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{save_rect, stop_sentinel_present, write_stop_sentinel};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn quiet_wait_launches_with_saved_rect() {
        let temp = tempdir().unwrap();
        let rect = SavedRect {
            left: 10,
            top: 20,
            right: 800,
            bottom: 600,
        };
        save_rect(temp.path(), "abc", rect).unwrap();

        let before = epoch_seconds();
        let verdict = decide(temp.path(), "abc", None, |_| {});
        let after = epoch_seconds();

        match verdict {
            StopVerdict::Launch { start_time, rect: r } => {
                assert_eq!(r, Some(rect));
                assert!(start_time >= before && start_time <= after);
            }
            other => panic!("expected Launch, got {other:?}"),
        }
    }

    #[test]
    fn quiet_wait_without_rect_launches_with_none() {
        let temp = tempdir().unwrap();
        let verdict = decide(temp.path(), "abc", None, |_| {});
        assert!(matches!(
            verdict,
            StopVerdict::Launch { rect: None, .. }
        ));
    }

    #[test]
    fn prompt_during_wait_aborts_and_consumes_sentinel() {
        let temp = tempdir().unwrap();
        let signals = temp.path().to_path_buf();
        let verdict = decide(temp.path(), "abc", None, |_| {
            write_stop_sentinel(&signals, "abc").unwrap();
        });
        assert_eq!(verdict, StopVerdict::NewPrompt);
        assert!(!stop_sentinel_present(temp.path(), "abc"));
    }

    #[test]
    fn leftover_sentinel_is_cleared_before_the_wait() {
        let temp = tempdir().unwrap();
        write_stop_sentinel(temp.path(), "abc").unwrap();
        let verdict = decide(temp.path(), "abc", None, |_| {});
        assert!(matches!(verdict, StopVerdict::Launch { .. }));
    }

    #[test]
    fn transcript_growth_during_wait_aborts() {
        let temp = tempdir().unwrap();
        let transcript = temp.path().join("transcript.jsonl");
        fs::write(&transcript, "line one\n").unwrap();

        let grow_path = transcript.clone();
        let verdict = decide(temp.path(), "abc", Some(&transcript), move |_| {
            fs::write(&grow_path, "line one\nline two\n").unwrap();
        });
        assert_eq!(verdict, StopVerdict::StillWorking);
    }

    #[test]
    fn unchanged_transcript_launches() {
        let temp = tempdir().unwrap();
        let transcript = temp.path().join("transcript.jsonl");
        fs::write(&transcript, "line one\n").unwrap();
        let verdict = decide(temp.path(), "abc", Some(&transcript), |_| {});
        assert!(matches!(verdict, StopVerdict::Launch { .. }));
    }

    #[test]
    fn missing_transcript_counts_as_size_zero() {
        let temp = tempdir().unwrap();
        let transcript = temp.path().join("never-written.jsonl");
        let verdict = decide(temp.path(), "abc", Some(&transcript), |_| {});
        assert!(matches!(verdict, StopVerdict::Launch { .. }));
    }

    #[test]
    fn transcript_appearing_during_wait_counts_as_growth() {
        let temp = tempdir().unwrap();
        let transcript = temp.path().join("late.jsonl");
        let create_path = transcript.clone();
        let verdict = decide(temp.path(), "abc", Some(&transcript), move |_| {
            fs::write(&create_path, "first output\n").unwrap();
        });
        assert_eq!(verdict, StopVerdict::StillWorking);
    }

    #[test]
    fn overlay_argv_encodes_session_time_and_rect() {
        let rect = SavedRect {
            left: 1,
            top: 2,
            right: 3,
            bottom: 4,
        };
        assert_eq!(
            overlay_argv("abc", 1724000000.5, Some(rect)),
            vec!["abc", "1724000000.500", "1", "2", "3", "4"]
        );
        assert_eq!(overlay_argv("abc", 7.0, None), vec!["abc", "7.000"]);
    }

    #[test]
    fn wait_receives_the_settle_delay() {
        let temp = tempdir().unwrap();
        let mut seen = None;
        decide(temp.path(), "abc", None, |d| seen = Some(d));
        assert_eq!(seen, Some(SETTLE_DELAY));
    }
}
