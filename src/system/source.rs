use color_eyre::Result;

/// One record of a raw process enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub ppid: u32,
    pub threads: u32,
    pub name: String,
}

/// Best-effort per-process counters. Busy ticks must use the same unit as
/// [`ProcessSource::system_busy_ticks`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessDetail {
    pub busy_ticks: u64,
    pub working_set_bytes: u64,
}

/// The OS side of the sampler.
///
/// `system_busy_ticks` is read before `enumerate`, and `detail` is only
/// called for pids returned by the enumeration of the same cycle. Enumeration
/// order carries no meaning.
pub trait ProcessSource {
    /// Total non-idle time since boot. Returns 0 when unavailable.
    fn system_busy_ticks(&mut self) -> u64;

    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>>;

    /// `None` when the process exited mid-scan or cannot be queried.
    fn detail(&mut self, pid: u32) -> Option<ProcessDetail>;
}
