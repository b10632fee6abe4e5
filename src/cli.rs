use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "tasktop",
    about = "Top-like process monitor with delta-based CPU sampling",
    disable_help_flag = true
)]
pub struct Cli {
    /// Refresh continuously (top mode)
    #[arg(
        short = 't',
        long = "top",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub top: Option<bool>,

    /// Seconds between refreshes (implies --top)
    #[arg(short = 's', long = "seconds", value_name = "SEC", value_parser = parse_seconds)]
    pub seconds: Option<f64>,

    /// Max processes to display (default: fit terminal)
    #[arg(short = 'n', long = "numprocs", value_name = "N", value_parser = parse_count)]
    pub numprocs: Option<usize>,

    /// Terminate a process before displaying
    #[arg(short = 'k', long = "kill", value_name = "PID")]
    pub kill: Option<u32>,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show this help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    #[allow(dead_code)] // consumed by clap
    help: Option<bool>,
}

fn parse_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number of seconds"))?;
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(format!("interval must be greater than 0, got `{value}`"))
    }
}

fn parse_count(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("process count must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(_) => Err(format!("`{value}` is not a process count")),
    }
}

/// Flags merged over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub top_mode: bool,
    pub interval_secs: f64,
    /// 0 = fit to the terminal.
    pub max_rows: usize,
    pub kill_pid: Option<u32>,
    pub snapshot_delay: Duration,
    pub truncate_to_width: bool,
}

impl Cli {
    pub fn top_mode(&self) -> bool {
        self.seconds.is_some() || self.top.unwrap_or(false)
    }

    pub fn resolve(&self, config: &Config) -> RunOptions {
        RunOptions {
            top_mode: self.top_mode(),
            interval_secs: self
                .seconds
                .unwrap_or_else(|| config.general.refresh_interval()),
            max_rows: self.numprocs.unwrap_or(config.general.max_rows),
            kill_pid: self.kill,
            snapshot_delay: Duration::from_millis(config.general.snapshot_delay_ms),
            truncate_to_width: config.display.truncate_to_width,
        }
    }
}
