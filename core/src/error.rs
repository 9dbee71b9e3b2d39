//! Error types for the task API client.
//!
//! # Design
//! `InvalidArgument` is raised while building a request, so it always means
//! nothing went over the wire. `UnexpectedStatus` carries both the actual and
//! the expected code and makes no distinction between 4xx and 5xx. Transport
//! failures are wrapped without reinterpretation.

/// Errors returned by the client and the endpoint builders/parsers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A caller-supplied identifier or revision is not numeric.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a status other than the operation's expected one.
    #[error("Wunderlist API returned status code {status} expected {expected}")]
    UnexpectedStatus { status: u16, expected: u16 },

    /// The transport failed below HTTP.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded as the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// A failure raised by a `Transport` implementation.
#[derive(Debug, thiserror::Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }
}
