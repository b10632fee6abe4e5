/// Machine-wide figures shown above the process table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSummary {
    pub uptime_secs: u64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub logical_cpus: usize,
}
