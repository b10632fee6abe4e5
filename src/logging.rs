use color_eyre::eyre::{Result, eyre};
use tracing::Level;

/// Plain-text events on stderr so they never interleave with the table on
/// stdout.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
