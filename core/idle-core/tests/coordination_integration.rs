//! Integration tests for the prompt→stop coordination flow: the sequences
//! the two hooks and the overlay actually run against a shared signals
//! directory, without spawning real processes or windows.

use idle_core::decision::{self, StopVerdict};
use idle_core::signal::{self, SavedRect};
use idle_core::teams;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// What `idle-hook prompt` does to the signals directory.
fn simulate_prompt_hook(signals: &Path, session_id: &str, rect: SavedRect) {
    signal::write_stop_sentinel(signals, session_id).unwrap();
    signal::save_rect(signals, session_id, rect).unwrap();
}

#[test]
fn test_prompt_then_quiet_stop_launches_with_the_saved_rect() {
    let temp = tempdir().unwrap();
    let rect = SavedRect {
        left: 50,
        top: 60,
        right: 1250,
        bottom: 760,
    };
    simulate_prompt_hook(temp.path(), "abc", rect);

    // The overlay from the previous turn (if any) consumed the sentinel
    // long ago; the stop hook clears leftovers itself either way.
    let verdict = decision::decide(temp.path(), "abc", None, |_| {});

    match verdict {
        StopVerdict::Launch { start_time, rect: r } => {
            assert_eq!(r, Some(rect));
            assert!(start_time > 0.0);
        }
        other => panic!("expected Launch, got {other:?}"),
    }
    // The sentinel written at prompt time must be gone, or the freshly
    // launched overlay would die on its first poll tick.
    assert!(!signal::stop_sentinel_present(temp.path(), "abc"));
}

#[test]
fn test_prompt_racing_the_settle_window_suppresses_the_launch() {
    let temp = tempdir().unwrap();
    let signals = temp.path().to_path_buf();

    let verdict = decision::decide(temp.path(), "abc", None, |_| {
        // User submits a new prompt mid-wait.
        simulate_prompt_hook(
            &signals,
            "abc",
            SavedRect {
                left: 0,
                top: 0,
                right: 100,
                bottom: 100,
            },
        );
    });

    assert_eq!(verdict, StopVerdict::NewPrompt);
}

#[test]
fn test_growing_transcript_suppresses_the_launch() {
    let temp = tempdir().unwrap();
    let transcript = temp.path().join("transcript.jsonl");
    fs::write(&transcript, "{\"role\":\"assistant\"}\n").unwrap();

    let grow = transcript.clone();
    let verdict = decision::decide(temp.path(), "abc", Some(&transcript), move |_| {
        let mut content = fs::read(&grow).unwrap();
        content.extend_from_slice(b"{\"role\":\"assistant\",\"more\":true}\n");
        fs::write(&grow, content).unwrap();
    });

    assert_eq!(verdict, StopVerdict::StillWorking);
}

#[test]
fn test_overlay_poll_consumes_the_sentinel_exactly_once() {
    let temp = tempdir().unwrap();
    signal::write_stop_sentinel(temp.path(), "abc").unwrap();

    // First poll tick sees it and consumes; the next tick sees nothing.
    assert!(signal::consume_stop_sentinel(temp.path(), "abc"));
    assert!(!signal::consume_stop_sentinel(temp.path(), "abc"));
}

#[test]
fn test_lead_session_is_suppressed_before_any_signaling() {
    let temp = tempdir().unwrap();
    let teams_dir = temp.path().join("teams");
    fs::create_dir_all(teams_dir.join("demo-team")).unwrap();
    fs::write(
        teams_dir.join("demo-team").join("config.json"),
        r#"{"name":"demo-team","leadSessionId":"abc"}"#,
    )
    .unwrap();

    assert!(teams::is_lead_session(&teams_dir, "abc"));
    assert!(!teams::is_lead_session(&teams_dir, "worker-1"));
}

#[test]
fn test_launch_argv_is_understood_by_a_fresh_parse() {
    // The stop hook encodes argv with overlay_argv; the overlay's lenient
    // parser must accept every shape it can produce.
    for rect in [
        None,
        Some(SavedRect {
            left: 10,
            top: 20,
            right: 1930,
            bottom: 1100,
        }),
    ] {
        let argv = decision::overlay_argv("abc", 1724000000.125, rect);
        assert_eq!(argv[0], "abc");
        assert_eq!(argv[1].parse::<f64>().unwrap(), 1724000000.125);
        match rect {
            Some(r) => {
                assert_eq!(argv.len(), 6);
                assert_eq!(
                    SavedRect::parse(&argv[2..].join(",")),
                    Some(r)
                );
            }
            None => assert_eq!(argv.len(), 2),
        }
    }
}

#[test]
fn test_two_sessions_do_not_interfere() {
    let temp = tempdir().unwrap();
    simulate_prompt_hook(
        temp.path(),
        "one",
        SavedRect {
            left: 0,
            top: 0,
            right: 800,
            bottom: 600,
        },
    );

    // Session "two" never prompted; its stop decision sees no rect and no
    // sentinel, and session "one"'s artifacts stay untouched.
    let verdict = decision::decide(temp.path(), "two", None, |_| {});
    assert!(matches!(verdict, StopVerdict::Launch { rect: None, .. }));
    assert!(signal::stop_sentinel_present(temp.path(), "one"));
    assert!(signal::load_rect(temp.path(), "one").is_some());
}
