use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use sysinfo::Signal;
use tracing::info;

use tasktop::cli::{Cli, RunOptions};
use tasktop::config::{Config, load_config, load_config_from_path};
use tasktop::layout::resolve_max_rows;
use tasktop::logging;
use tasktop::render::{self, SummaryContext};
use tasktop::system::collector::Collector;
use tasktop::system::kill::kill_process;
use tasktop::system::sampler::{ProcessRow, Sampler};
use tasktop::terminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init_tracing(config.general.tracing_level())?;
    let opts = cli.resolve(&config);

    let collector = Collector::new();

    if let Some(pid) = opts.kill_pid {
        let result = kill_process(collector.system(), pid, Signal::Kill);
        if !result.is_success() {
            eprintln!("{}", result.message());
            std::process::exit(1);
        }
        println!("{}", result.message());
        if !opts.top_mode {
            return Ok(());
        }
    }

    let mut sampler = Sampler::new(collector);
    if opts.top_mode {
        run_top(&mut sampler, &opts).await
    } else {
        run_once(&mut sampler, &opts).await
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}

/// Warm-up sample, short pause, then one rendered snapshot.
async fn run_once(sampler: &mut Sampler<Collector>, opts: &RunOptions) -> Result<()> {
    sampler.sample();
    tokio::time::sleep(opts.snapshot_delay).await;
    let rows = sampler.sample();

    let mut out = io::stdout();
    render_frame(&mut out, sampler, &rows, opts.snapshot_delay.as_secs_f64(), opts)
}

/// Redraws every interval until Ctrl-C.
async fn run_top(sampler: &mut Sampler<Collector>, opts: &RunOptions) -> Result<()> {
    let interval = Duration::try_from_secs_f64(opts.interval_secs).unwrap_or(Duration::MAX);
    sampler.sample();

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, leaving top mode");
                return Ok(());
            }
        }

        let rows = sampler.sample();
        let mut out = io::stdout();
        terminal::clear_screen(&mut out)?;
        render_frame(&mut out, sampler, &rows, opts.interval_secs, opts)?;
    }
}

fn render_frame<W: Write>(
    out: &mut W,
    sampler: &mut Sampler<Collector>,
    rows: &[ProcessRow],
    interval_secs: f64,
    opts: &RunOptions,
) -> Result<()> {
    // Re-read every frame: the terminal may have been resized.
    let viewport = terminal::detect_viewport();
    let max_rows = resolve_max_rows(viewport, opts.max_rows);
    let width = if opts.truncate_to_width {
        viewport.columns
    } else {
        0
    };

    let summary = sampler.source_mut().summary();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let ctx = SummaryContext {
        interval_secs,
        process_count: sampler.last_process_count(),
        timestamp: &timestamp,
    };

    render::write_summary(out, &ctx, &summary, width)?;
    render::write_table(out, rows, max_rows, width)?;
    out.flush()?;
    Ok(())
}
