//! Synchronous client core for the Wunderlist task API.
//!
//! # Overview
//! Five operations (`get_lists`, `get_list`, `get_list_tasks`,
//! `create_task`, `complete_task`) each map to one REST call. Responses are
//! decoded into generic JSON mappings and handed back as-is.
//!
//! # Design
//! - `endpoints` holds the pure `build_*` / `parse_*` pair of every
//!   operation, with one expected status per operation.
//! - `WunderlistClient` runs build → execute → parse over any `Transport`.
//! - `UreqTransport` is the blocking network implementation; it owns the
//!   base address and the credential headers.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::WunderlistClient;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::{TransportConfig, UreqTransport, DEFAULT_BASE_URL};
pub use types::{Mapping, NumericArg};
