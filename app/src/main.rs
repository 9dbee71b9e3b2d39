//! Renders the configured list as HTML on stdout.

use std::io::Write;

use tracing_subscriber::EnvFilter;
use wunderview::config::Config;
use wunderview::AppError;

fn main() -> Result<(), AppError> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(base_url = %config.api.base_url, list_id = %config.list.id, "rendering list");

    let html = wunderview::run(&config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
