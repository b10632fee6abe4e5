use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::source::{ProcessDetail, ProcessSource};
use crate::format::bytes_to_mb;

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub ppid: u32,
    pub cpu_percent: f64,
    pub working_set_mb: f64,
    pub threads: u32,
    pub name: String,
}

/// Turns successive process enumerations into CPU percentages.
///
/// Only the immediately preceding sample is kept as a baseline, so a single
/// call can never report a non-zero percentage.
pub struct Sampler<S> {
    source: S,
    prev_system_busy: u64,
    prev_proc_busy: HashMap<u32, u64>,
    last_process_count: usize,
}

impl<S: ProcessSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Sampler {
            source,
            prev_system_busy: 0,
            prev_proc_busy: HashMap::new(),
            last_process_count: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Number of rows produced by the most recent [`Sampler::sample`] call.
    pub fn last_process_count(&self) -> usize {
        self.last_process_count
    }

    pub fn sample(&mut self) -> Vec<ProcessRow> {
        let _span = tracing::debug_span!("sampler.sample").entered();

        let system_busy = self.source.system_busy_ticks();
        let entries = match self.source.enumerate() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("process enumeration failed: {err}");
                self.last_process_count = 0;
                return Vec::new();
            }
        };

        let system_delta = if self.prev_system_busy != 0 && system_busy > self.prev_system_busy {
            Some(system_busy - self.prev_system_busy)
        } else {
            if self.prev_system_busy != 0 {
                warn!(
                    previous = self.prev_system_busy,
                    current = system_busy,
                    "system busy counter did not advance"
                );
            }
            None
        };

        let mut current_busy = HashMap::with_capacity(entries.len());
        let mut rows = Vec::with_capacity(entries.len());

        for entry in entries {
            let detail = self.source.detail(entry.pid).unwrap_or_default();
            current_busy.insert(entry.pid, detail.busy_ticks);

            let cpu_percent = system_delta
                .map(|delta| self.process_percent(entry.pid, detail, delta))
                .unwrap_or(0.0);

            rows.push(ProcessRow {
                pid: entry.pid,
                ppid: entry.ppid,
                cpu_percent,
                working_set_mb: bytes_to_mb(detail.working_set_bytes),
                threads: entry.threads,
                name: entry.name,
            });
        }

        self.prev_proc_busy = current_busy;
        self.prev_system_busy = system_busy;
        self.last_process_count = rows.len();

        rank_rows(&mut rows);
        debug!(
            processes = rows.len(),
            system_delta = system_delta.unwrap_or(0),
            "sample complete"
        );
        rows
    }

    fn process_percent(&self, pid: u32, detail: ProcessDetail, system_delta: u64) -> f64 {
        match self.prev_proc_busy.get(&pid) {
            Some(&prev) if detail.busy_ticks >= prev => {
                100.0 * (detail.busy_ticks - prev) as f64 / system_delta as f64
            }
            _ => 0.0,
        }
    }
}

/// Descending CPU%, then ascending pid.
pub fn rank_rows(rows: &mut [ProcessRow]) {
    rows.sort_by(compare_rows);
}

fn compare_rows(a: &ProcessRow, b: &ProcessRow) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| a.pid.cmp(&b.pid))
}
