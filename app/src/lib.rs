//! # wunderview
//!
//! Fetches the tasks of one list from the task API and renders them as HTML.
//! This crate is wiring only: the client lives in `wunderlist-core`, the
//! markup in `templates/list.html`.

pub mod config;
pub mod view;

use askama::Template;
use wunderlist_core::{ApiError, NumericArg, Transport, UreqTransport, WunderlistClient};

use crate::config::{Config, ConfigError};
use crate::view::ListTemplate;

/// Errors surfaced by the entrypoint.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to render template")]
    Render(#[from] askama::Error),
    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

/// Builds the transport and client from `config` and renders the configured list.
pub fn run(config: &Config) -> Result<String, AppError> {
    let client = WunderlistClient::new(UreqTransport::new(&config.api));
    render_list_tasks(&client, config.list.id.as_str())
}

/// Fetches the tasks of `list_id` and renders them.
pub fn render_list_tasks<T: Transport>(
    client: &WunderlistClient<T>,
    list_id: impl Into<NumericArg>,
) -> Result<String, AppError> {
    let tasks = client.get_list_tasks(list_id)?;
    tracing::info!(count = tasks.len(), "fetched tasks");
    Ok(ListTemplate::new(&tasks).render()?)
}
