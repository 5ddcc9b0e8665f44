use std::sync::Mutex;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use crate::domain::entities::process::ProcessSample;
use crate::domain::ports::scanner::{ProcessScanner, ScanError};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Enumerates live processes through the `sysinfo` crate.
///
/// Uses `Mutex<System>` for interior mutability since the `ProcessScanner`
/// trait requires `&self` but `sysinfo::System` needs `&mut self` for
/// refresh. Each call refreshes before reading, so results reflect live OS
/// state at call time; processes that exit between two calls simply drop
/// out of the next snapshot.
pub struct SysinfoScanner {
    sys: Mutex<System>,
}

impl SysinfoScanner {
    /// Creates a new scanner with pre-initialized system data.
    #[must_use]
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
        }
    }
}

impl Default for SysinfoScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessScanner for SysinfoScanner {
    fn scan(&self, tag: &str) -> Result<Vec<ProcessSample>, ScanError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| ScanError::EnumerationFailed(format!("system lock poisoned: {e}")))?;
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let needle = tag.to_lowercase();
        let samples = sys
            .processes()
            .values()
            .filter_map(|proc_info| {
                let cmdline = command_line(proc_info);
                cmdline
                    .to_lowercase()
                    .contains(&needle)
                    .then(|| sample_of(proc_info, cmdline))
            })
            .collect();
        Ok(samples)
    }

    fn self_sample(&self) -> Result<ProcessSample, ScanError> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| ScanError::EnumerationFailed(e.to_string()))?;

        let mut sys = self
            .sys
            .lock()
            .map_err(|e| ScanError::EnumerationFailed(format!("system lock poisoned: {e}")))?;
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        let proc_info = sys
            .process(pid)
            .ok_or_else(|| ScanError::ProcessGone(pid.as_u32()))?;
        Ok(sample_of(proc_info, command_line(proc_info)))
    }
}

fn command_line(proc_info: &sysinfo::Process) -> String {
    let cmdline = proc_info
        .cmd()
        .iter()
        .map(|s| s.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    // Kernel threads have an empty cmd(); fall back to the bracketed name.
    if cmdline.is_empty() {
        format!("[{}]", proc_info.name().to_string_lossy())
    } else {
        cmdline
    }
}

#[allow(clippy::cast_precision_loss)]
fn sample_of(proc_info: &sysinfo::Process, cmdline: String) -> ProcessSample {
    ProcessSample {
        pid: proc_info.pid().as_u32(),
        cmdline,
        rss_mb: proc_info.memory() as f64 / BYTES_PER_MB,
    }
}
