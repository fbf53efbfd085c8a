//! The overlay window and its event loop.
//!
//! Windows: a fixed-size WS_POPUP tool window, topmost and layered at 85%
//! alpha, that never takes focus (WM_MOUSEACTIVATE returns MA_NOACTIVATE,
//! so the dismiss click lands without activating anything). Two timers
//! drive it: a 1 s repaint of the elapsed label and a 200 ms poll of the
//! stop sentinel. Rendering, timers, and the click handler all run on the
//! one message loop; WM_DESTROY kills the timers, frees the GDI objects,
//! and ends the process.
//!
//! Other platforms: a headless loop that honors the same signaling
//! contract (sentinel poll, elapsed tick) without a widget, so the
//! protocol stays exercised off Windows.

use crate::args::OverlayArgs;
use std::path::Path;

pub const UPDATE_INTERVAL_MS: u32 = 1000;
pub const POLL_INTERVAL_MS: u32 = 200;

#[cfg(windows)]
pub fn run(signals_dir: &Path, args: &OverlayArgs) -> Result<(), String> {
    platform::run(signals_dir, args)
}

#[cfg(not(windows))]
pub fn run(signals_dir: &Path, args: &OverlayArgs) -> Result<(), String> {
    use idle_core::{decision, format, signal};
    use std::thread;
    use std::time::Duration;

    let session_id = &args.session_id;
    let mut ticks: u32 = 0;
    loop {
        if signal::consume_stop_sentinel(signals_dir, session_id) {
            tracing::debug!(session = %session_id, "Stop sentinel consumed, exiting");
            return Ok(());
        }
        if ticks % 5 == 0 {
            let elapsed = (decision::epoch_seconds() - args.start_time).max(0.0) as u64;
            tracing::debug!(session = %session_id, label = %format::elapsed_label(elapsed), "tick");
        }
        ticks = ticks.wrapping_add(1);
        thread::sleep(Duration::from_millis(u64::from(POLL_INTERVAL_MS)));
    }
}

#[cfg(windows)]
mod platform {
    use super::{POLL_INTERVAL_MS, UPDATE_INTERVAL_MS};
    use crate::args::OverlayArgs;
    use crate::placement::{self, HEIGHT, WIDTH};
    use fs_err as fs;
    use idle_core::{decision, format, paths, signal};
    use std::path::{Path, PathBuf};
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
    use windows::Win32::Graphics::Gdi::{
        BeginPaint, CreateFontW, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint, FillRect,
        InvalidateRect, SelectObject, SetBkMode, SetTextColor, CLEARTYPE_QUALITY, CLIP_DEFAULT_PRECIS,
        DEFAULT_CHARSET, DT_CENTER, DT_SINGLELINE, DT_VCENTER, FONT_PITCH_AND_FAMILY, HBRUSH,
        HFONT, OUT_DEFAULT_PRECIS, PAINTSTRUCT, TRANSPARENT,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
        GetMessageW, GetSystemMetrics, GetWindowLongPtrW, KillTimer, LoadCursorW, PostQuitMessage,
        RegisterClassW, SetLayeredWindowAttributes, SetTimer, SetWindowLongPtrW, ShowWindow,
        TranslateMessage, CS_HREDRAW, CS_VREDRAW, GWLP_USERDATA, IDC_ARROW, LWA_ALPHA,
        MA_NOACTIVATE, MSG, SM_CXSCREEN, SM_CYSCREEN, SW_SHOWNOACTIVATE, WINDOW_EX_STYLE,
        WM_DESTROY, WM_LBUTTONDOWN, WM_MOUSEACTIVATE, WM_PAINT, WM_TIMER, WNDCLASSW,
        WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
    };

    // Light text on a dark panel; COLORREF is 0x00BBGGRR.
    const BG: COLORREF = COLORREF(0x002e1e1e); // #1e1e2e
    const FG: COLORREF = COLORREF(0x00f4d6cd); // #cdd6f4
    const ALPHA: u8 = 216; // 85% of 255
    const FONT_FACE: &str = "Segoe UI";
    const FONT_SIZE: i32 = 14;
    const TIMER_UPDATE: usize = 1;
    const TIMER_POLL: usize = 2;

    /// Per-instance state the wndproc reaches through GWLP_USERDATA.
    /// Owned by the window: allocated before ShowWindow, reclaimed and
    /// dropped in WM_DESTROY.
    struct WindowState {
        start_time: f64,
        stop_sentinel: PathBuf,
        font: HFONT,
        brush: HBRUSH,
    }

    fn compose_ex_style() -> WINDOW_EX_STYLE {
        WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE | WS_EX_LAYERED
    }

    fn widestring(value: &str) -> Vec<u16> {
        value.encode_utf16().chain(std::iter::once(0)).collect()
    }

    unsafe fn state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
        if ptr == 0 {
            None
        } else {
            Some(&*(ptr as *const WindowState))
        }
    }

    unsafe fn paint(hwnd: HWND) {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.0.is_null() {
            return;
        }
        if let Some(state) = state(hwnd) {
            let mut rc = RECT::default();
            let _ = GetClientRect(hwnd, &mut rc);
            FillRect(hdc, &rc, state.brush);

            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, FG);
            let old = SelectObject(hdc, state.font);

            let elapsed = (decision::epoch_seconds() - state.start_time).max(0.0) as u64;
            let mut text: Vec<u16> = format::elapsed_label(elapsed).encode_utf16().collect();
            DrawTextW(hdc, &mut text, &mut rc, DT_CENTER | DT_VCENTER | DT_SINGLELINE);

            SelectObject(hdc, old);
        }
        let _ = EndPaint(hwnd, &ps);
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE as isize),
            WM_LBUTTONDOWN => {
                // Manual dismissal; no sentinel involved.
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }
            WM_PAINT => {
                paint(hwnd);
                LRESULT(0)
            }
            WM_TIMER => {
                match wparam.0 {
                    TIMER_UPDATE => {
                        let _ = InvalidateRect(hwnd, None, true);
                    }
                    TIMER_POLL => {
                        if let Some(state) = state(hwnd) {
                            if state.stop_sentinel.exists() {
                                let _ = fs::remove_file(&state.stop_sentinel);
                                let _ = DestroyWindow(hwnd);
                            }
                        }
                    }
                    _ => {}
                }
                LRESULT(0)
            }
            WM_DESTROY => {
                let _ = KillTimer(hwnd, TIMER_UPDATE);
                let _ = KillTimer(hwnd, TIMER_POLL);
                let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                if ptr != 0 {
                    let state = Box::from_raw(ptr as *mut WindowState);
                    let _ = DeleteObject(state.font);
                    let _ = DeleteObject(state.brush);
                }
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    pub fn run(signals_dir: &Path, args: &OverlayArgs) -> Result<(), String> {
        let class = widestring(&signal::overlay_window_class(&args.session_id));
        let hinstance = unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map_err(|e| format!("GetModuleHandleW failed: {e}"))?;

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            hInstance: hinstance.into(),
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            lpszClassName: PCWSTR(class.as_ptr()),
            ..Default::default()
        };
        if unsafe { RegisterClassW(&wc) } == 0 {
            return Err("RegisterClassW failed".to_string());
        }

        let screen = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        let (x, y) = placement::resolve(args.rect, screen);

        let hwnd = unsafe {
            CreateWindowExW(
                compose_ex_style(),
                PCWSTR(class.as_ptr()),
                PCWSTR::null(),
                WS_POPUP,
                x,
                y,
                WIDTH,
                HEIGHT,
                None,
                None,
                hinstance,
                None,
            )
        }
        .map_err(|e| format!("CreateWindowExW failed: {e}"))?;

        unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), ALPHA, LWA_ALPHA) }
            .map_err(|e| format!("SetLayeredWindowAttributes failed: {e}"))?;

        let face = widestring(FONT_FACE);
        let font = unsafe {
            CreateFontW(
                -FONT_SIZE,
                0,
                0,
                0,
                400,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_DEFAULT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                CLEARTYPE_QUALITY,
                FONT_PITCH_AND_FAMILY(0),
                PCWSTR(face.as_ptr()),
            )
        };
        let brush = unsafe { CreateSolidBrush(BG) };

        let state = Box::new(WindowState {
            start_time: args.start_time,
            stop_sentinel: paths::stop_sentinel_path(signals_dir, &args.session_id),
            font,
            brush,
        });
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            SetTimer(hwnd, TIMER_UPDATE, UPDATE_INTERVAL_MS, None);
            SetTimer(hwnd, TIMER_POLL, POLL_INTERVAL_MS, None);
        }

        let mut msg = MSG::default();
        unsafe {
            while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod windows_tests {
        use super::compose_ex_style;
        use windows::Win32::UI::WindowsAndMessaging::{
            WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT,
        };

        #[test]
        fn style_flags_keep_the_widget_topmost_and_unfocusable() {
            let style = compose_ex_style();
            assert_ne!(style.0 & WS_EX_TOPMOST.0, 0);
            assert_ne!(style.0 & WS_EX_TOOLWINDOW.0, 0);
            assert_ne!(style.0 & WS_EX_NOACTIVATE.0, 0);
            assert_ne!(style.0 & WS_EX_LAYERED.0, 0);
            // Not click-through: the dismiss click must land on the window.
            assert_eq!(style.0 & WS_EX_TRANSPARENT.0, 0);
        }
    }
}
