use std::io::{self, Write};

use crate::format::{bytes_to_mb, format_uptime, truncate_unicode};
use crate::system::sampler::ProcessRow;
use crate::system::snapshot::SystemSummary;

const RULE_WIDTH: usize = 60;

/// Everything the summary block needs besides the machine figures.
pub struct SummaryContext<'a> {
    pub interval_secs: f64,
    pub process_count: usize,
    pub timestamp: &'a str,
}

/// Writes lines clipped to `width` display columns; 0 disables clipping.
struct ClippedWriter<'w, W: Write> {
    out: &'w mut W,
    width: usize,
}

impl<W: Write> ClippedWriter<'_, W> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        if self.width == 0 {
            writeln!(self.out, "{text}")
        } else {
            writeln!(self.out, "{}", truncate_unicode(text, self.width))
        }
    }
}

pub fn write_summary<W: Write>(
    out: &mut W,
    ctx: &SummaryContext<'_>,
    summary: &SystemSummary,
    width: usize,
) -> io::Result<()> {
    let mut w = ClippedWriter { out, width };
    w.line(&format!(
        "top-like view (interval {:.2}s) | procs: {} | uptime: {}",
        ctx.interval_secs,
        ctx.process_count,
        format_uptime(summary.uptime_secs)
    ))?;
    w.line(&format!(
        "Time: {} | Mem: {:.1}MB/{:.1}MB | Logical CPUs: {}",
        ctx.timestamp,
        bytes_to_mb(summary.memory_used_bytes),
        bytes_to_mb(summary.memory_total_bytes),
        summary.logical_cpus
    ))?;
    w.line("")
}

/// Header, rule and up to `max_rows` rows (0 = all).
pub fn write_table<W: Write>(
    out: &mut W,
    rows: &[ProcessRow],
    max_rows: usize,
    width: usize,
) -> io::Result<()> {
    let mut w = ClippedWriter { out, width };
    w.line(&format!(
        "{:<7}{:<7}{:>8}{:>12}{:>9}  NAME",
        "PID", "PPID", "CPU%", "MEM(MB)", "THREADS"
    ))?;
    w.line(&"-".repeat(RULE_WIDTH))?;

    let limit = if max_rows > 0 {
        max_rows.min(rows.len())
    } else {
        rows.len()
    };
    for row in &rows[..limit] {
        w.line(&format!(
            "{:<7}{:<7}{:>8.1}{:>12.1}{:>9}  {}",
            row.pid, row.ppid, row.cpu_percent, row.working_set_mb, row.threads, row.name
        ))?;
    }
    Ok(())
}
