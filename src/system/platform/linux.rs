use std::collections::HashMap;
use std::sync::OnceLock;

use super::PlatformExtensions;

pub struct Platform;

fn clock_ticks_per_sec() -> u64 {
    static CLK_TCK: OnceLock<u64> = OnceLock::new();
    *CLK_TCK.get_or_init(|| {
        // SAFETY: sysconf has no preconditions; errors are reported as -1.
        let tck = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if tck > 0 { tck as u64 } else { 100 }
    })
}

/// Sum of the non-idle columns of the aggregate `cpu` line of /proc/stat,
/// in clock ticks. guest time is already folded into user.
fn parse_busy_ticks(stat: &str) -> Option<u64> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|f| f.parse().ok())
        .collect::<Option<_>>()?;
    // user(0) nice(1) system(2) idle(3) iowait(4) irq(5) softirq(6) steal(7)
    if fields.len() < 4 {
        return None;
    }
    let busy = fields
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != 3 && idx != 4 && idx < 8)
        .map(|(_, v)| *v)
        .sum();
    Some(busy)
}

/// num_threads from /proc/{pid}/stat.
fn parse_num_threads(stat: &str) -> Option<u32> {
    // comm may contain spaces and parens, so split after the last ')'
    let after_comm = stat.rfind(')')? + 1;
    let fields: Vec<&str> = stat[after_comm..].split_whitespace().collect();
    // state(0) ppid(1) ... cstime(14) priority(15) nice(16) num_threads(17)
    fields.get(17)?.parse().ok()
}

impl PlatformExtensions for Platform {
    fn system_busy_ms() -> Option<u64> {
        let contents = std::fs::read_to_string("/proc/stat").ok()?;
        let ticks = parse_busy_ticks(&contents)?;
        Some(ticks.saturating_mul(1000) / clock_ticks_per_sec())
    }

    fn thread_counts(pids: &[u32]) -> HashMap<u32, u32> {
        pids.iter()
            .filter_map(|&pid| {
                let contents = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
                Some((pid, parse_num_threads(&contents)?))
            })
            .collect()
    }
}
