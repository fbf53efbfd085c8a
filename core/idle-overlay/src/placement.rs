//! Bottom-right placement of the widget.

use idle_core::SavedRect;

pub const WIDTH: i32 = 120;
pub const HEIGHT: i32 = 36;
pub const MARGIN: i32 = 10;

// Wider offsets for the screen fallback so the widget clears taskbars.
const SCREEN_MARGIN_X: i32 = 20;
const SCREEN_MARGIN_Y: i32 = 60;

/// Top-left corner of the widget: inside the bottom-right of the terminal
/// rect when one was saved, otherwise relative to the full screen.
pub fn resolve(rect: Option<SavedRect>, screen: (i32, i32)) -> (i32, i32) {
    match rect {
        Some(rect) => (
            rect.right - WIDTH - MARGIN,
            rect.bottom - HEIGHT - MARGIN,
        ),
        None => (
            screen.0 - WIDTH - SCREEN_MARGIN_X,
            screen.1 - HEIGHT - SCREEN_MARGIN_Y,
        ),
    }
}
