//! Process liveness and best-effort termination for recorded overlay PIDs.
//!
//! Operating systems reuse PIDs. A recorded PID might now belong to an
//! unrelated process, so before signaling one we verify it still looks
//! like an overlay process (name or command line). Window identity is the
//! preferred shutdown channel; these helpers are the fallback when no
//! window can be found.

use sysinfo::{Pid, ProcessRefreshKind, System, UpdateKind};

pub fn is_pid_alive(pid: u32) -> bool {
    #[cfg(unix)]
    {
        // A pid that overflows i32 would become a process-group target.
        let Ok(pid) = i32::try_from(pid) else {
            return false;
        };
        unsafe { libc::kill(pid, 0) == 0 }
    }
    #[cfg(not(unix))]
    {
        let mut sys = System::new();
        let sys_pid = Pid::from(pid as usize);
        sys.refresh_process_specifics(sys_pid, ProcessRefreshKind::new());
        sys.process(sys_pid).is_some()
    }
}

/// Returns true if the process behind `pid` is alive and its name or
/// command line mentions the overlay binary. Guards against signaling a
/// reused PID.
pub fn looks_like_overlay(pid: u32, needle: &str) -> bool {
    let mut sys = System::new();
    let sys_pid = Pid::from(pid as usize);
    sys.refresh_process_specifics(
        sys_pid,
        ProcessRefreshKind::new().with_cmd(UpdateKind::Always),
    );

    let Some(process) = sys.process(sys_pid) else {
        return false;
    };

    if process.name().to_lowercase().contains(needle) {
        return true;
    }
    process
        .cmd()
        .iter()
        .any(|arg| arg.to_lowercase().contains(needle))
}

/// Asks the process to terminate. Best-effort; a brief overlap with a
/// replacement overlay is tolerable.
pub fn request_terminate(pid: u32) -> bool {
    #[cfg(unix)]
    {
        let Ok(pid) = i32::try_from(pid) else {
            return false;
        };
        unsafe { libc::kill(pid, libc::SIGTERM) == 0 }
    }
    #[cfg(not(unix))]
    {
        let mut sys = System::new();
        let sys_pid = Pid::from(pid as usize);
        sys.refresh_process_specifics(sys_pid, ProcessRefreshKind::new());
        sys.process(sys_pid).map(|p| p.kill()).unwrap_or(false)
    }
}
