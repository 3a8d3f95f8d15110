//! Process lookups backed by `sysinfo`.
//!
//! Only the queried process is refreshed on each call.

use std::sync::LazyLock;

use parking_lot::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

static SYS: LazyLock<Mutex<System>> = LazyLock::new(|| Mutex::new(System::new()));

/// Returns the executable name of a running process, or `None` if it has exited.
#[must_use]
pub fn process_name(pid: u32) -> Option<String> {
    let pid = Pid::from_u32(pid);
    let mut sys = SYS.lock();

    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing(),
    );

    sys.process(pid).map(|process| process.name().to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_process_has_a_name() {
        let pid = std::process::id();
        assert!(process_name(pid).is_some_and(|name| !name.is_empty()));
    }

    #[test]
    fn test_unknown_process_has_no_name() {
        assert_eq!(process_name(u32::MAX - 1), None);
    }
}
