//! Foreground window rect capture.
//!
//! At prompt time the user is typing in the correct terminal, so the
//! foreground window *is* the terminal. Capture is best-effort: any
//! failure yields `None` and the overlay later falls back to
//! screen-relative placement.

use idle_core::SavedRect;

#[cfg(windows)]
pub fn capture_rect() -> Option<SavedRect> {
    use windows::Win32::Foundation::RECT;
    use windows::Win32::UI::WindowsAndMessaging::{GetForegroundWindow, GetWindowRect};

    unsafe {
        let hwnd = GetForegroundWindow();
        if hwnd.0.is_null() {
            return None;
        }
        let mut rect = RECT::default();
        GetWindowRect(hwnd, &mut rect).ok()?;
        Some(SavedRect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        })
    }
}

#[cfg(not(windows))]
pub fn capture_rect() -> Option<SavedRect> {
    None
}
