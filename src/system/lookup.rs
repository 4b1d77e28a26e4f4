use std::ffi::OsStr;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Pids of running processes whose name is exactly `name`, ascending.
pub fn pids_by_name(name: &str) -> Vec<u32> {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());

    let mut pids: Vec<u32> = sys
        .processes_by_exact_name(OsStr::new(name))
        // sysinfo lists threads as processes on Linux; keep leaders only.
        .filter(|process| process.thread_kind().is_none())
        .map(|process| process.pid().as_u32())
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}
