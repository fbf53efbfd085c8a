//! Elapsed-time label shown in the overlay.

/// Past this many seconds the label drops to minute granularity; fine
/// seconds stop being meaningful and the cheaper redraw reduces flicker.
pub const COARSE_THRESHOLD_SECS: u64 = 300;

/// Formats elapsed seconds as the overlay text:
///
/// - under a minute: `⏳ 42s`
/// - under [`COARSE_THRESHOLD_SECS`]: `⏳ 3m 05s`
/// - at or past the threshold: `⏳ 12m`
pub fn elapsed_label(elapsed_secs: u64) -> String {
    let minutes = elapsed_secs / 60;
    let seconds = elapsed_secs % 60;
    if elapsed_secs >= COARSE_THRESHOLD_SECS {
        format!("\u{23f3} {minutes}m")
    } else if minutes > 0 {
        format!("\u{23f3} {minutes}m {seconds:02}s")
    } else {
        format!("\u{23f3} {seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_a_minute_shows_seconds_only() {
        assert_eq!(elapsed_label(0), "\u{23f3} 0s");
        assert_eq!(elapsed_label(9), "\u{23f3} 9s");
        assert_eq!(elapsed_label(59), "\u{23f3} 59s");
    }

    #[test]
    fn under_threshold_shows_minutes_and_padded_seconds() {
        assert_eq!(elapsed_label(60), "\u{23f3} 1m 00s");
        assert_eq!(elapsed_label(65), "\u{23f3} 1m 05s");
        assert_eq!(elapsed_label(185), "\u{23f3} 3m 05s");
        assert_eq!(elapsed_label(299), "\u{23f3} 4m 59s");
    }

    #[test]
    fn at_threshold_drops_to_minute_granularity() {
        assert_eq!(elapsed_label(300), "\u{23f3} 5m");
        assert_eq!(elapsed_label(359), "\u{23f3} 5m");
        assert_eq!(elapsed_label(3600), "\u{23f3} 60m");
    }
}
