use std::collections::HashMap;
use std::time::Instant;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessesToUpdate, System, ThreadKind};

use super::platform;
use super::snapshot::SystemSummary;
use super::source::{ProcessDetail, ProcessEntry, ProcessSource};

/// [`ProcessSource`] backed by sysinfo. All busy ticks are CPU-milliseconds.
pub struct Collector {
    sys: System,
    derived_busy: DerivedBusyClock,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );
        Collector {
            sys,
            derived_busy: DerivedBusyClock::new(),
        }
    }

    pub fn system(&self) -> &System {
        &self.sys
    }

    pub fn summary(&mut self) -> SystemSummary {
        self.sys.refresh_memory();
        SystemSummary {
            uptime_secs: System::uptime(),
            memory_used_bytes: self.sys.used_memory(),
            memory_total_bytes: self.sys.total_memory(),
            logical_cpus: self.sys.cpus().len(),
        }
    }
}

impl ProcessSource for Collector {
    fn system_busy_ticks(&mut self) -> u64 {
        if let Some(busy) = platform::system_busy_ms() {
            return busy;
        }
        self.sys.refresh_cpu_usage();
        self.derived_busy
            .advance(self.sys.global_cpu_usage(), self.sys.cpus().len())
    }

    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>> {
        let _span = tracing::debug_span!("collector.enumerate").entered();

        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        if self.sys.processes().is_empty() {
            return Err(eyre!("process table snapshot is empty"));
        }

        // Userland threads show up as processes on Linux; keep them folded
        // into their owning process.
        let pids: Vec<u32> = self
            .sys
            .processes()
            .iter()
            .filter(|(_, process)| !is_userland_thread(process))
            .map(|(pid, _)| pid.as_u32())
            .collect();
        let thread_counts: HashMap<u32, u32> = platform::thread_counts(&pids);

        let entries = pids
            .iter()
            .filter_map(|&pid| {
                let process = self.sys.process(Pid::from_u32(pid))?;
                let threads = thread_counts
                    .get(&pid)
                    .copied()
                    .or_else(|| process.tasks().map(|t| t.len() as u32))
                    .unwrap_or(0);
                Some(ProcessEntry {
                    pid,
                    ppid: process.parent().map(|p| p.as_u32()).unwrap_or(0),
                    threads,
                    name: process.name().to_string_lossy().to_string(),
                })
            })
            .collect();
        Ok(entries)
    }

    fn detail(&mut self, pid: u32) -> Option<ProcessDetail> {
        self.sys
            .process(Pid::from_u32(pid))
            .map(|process| ProcessDetail {
                busy_ticks: process.accumulated_cpu_time(),
                working_set_bytes: process.memory(),
            })
    }
}

fn is_userland_thread(process: &Process) -> bool {
    matches!(process.thread_kind(), Some(ThreadKind::Userland))
}

/// Integrates global CPU usage over wall time into a busy counter, for
/// platforms without an aggregate busy-time counter.
struct DerivedBusyClock {
    busy_ms: f64,
    last: Instant,
}

impl DerivedBusyClock {
    fn new() -> Self {
        // Start above zero: zero means "no baseline" to the sampler.
        DerivedBusyClock {
            busy_ms: 1.0,
            last: Instant::now(),
        }
    }

    fn advance(&mut self, usage_percent: f32, cpus: usize) -> u64 {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        let usage = f64::from(usage_percent.clamp(0.0, 100.0)) / 100.0;
        self.busy_ms += usage * elapsed_ms * cpus.max(1) as f64;
        self.busy_ms as u64
    }
}
