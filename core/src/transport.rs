//! Blocking `Transport` backed by ureq.
//!
//! The transport owns everything the endpoints leave out: the base address
//! and the three headers sent on every call (content type plus the client id
//! and access token). Credentials are passed in through `TransportConfig`;
//! nothing is read from the environment here.

use std::fmt;

use serde::Deserialize;
use ureq::RequestBuilder;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

pub const DEFAULT_BASE_URL: &str = "https://a.wunderlist.com/api/v1/";
pub const CLIENT_ID_HEADER: &str = "X-Client-ID";
pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// Base address and credentials for the remote API.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: String,
    pub client_id: String,
    pub access_token: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: String::new(),
            access_token: String::new(),
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Synchronous HTTP transport with a fixed base address and static headers.
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl UreqTransport {
    pub fn new(config: &TransportConfig) -> Self {
        // Status codes are interpreted by the endpoint parsers, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (CLIENT_ID_HEADER.to_string(), config.client_id.clone()),
                (ACCESS_TOKEN_HEADER.to_string(), config.access_token.clone()),
            ],
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers attached to every request, in the order they are sent.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Absolute URL for a path relative to the API root.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn decorate<B>(&self, mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        builder
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path);

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.decorate(self.agent.get(&url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                self.decorate(self.agent.post(&url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.decorate(self.agent.post(&url), request).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                self.decorate(self.agent.patch(&url), request).send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => self.decorate(self.agent.patch(&url), request).send_empty(),
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse { status, body })
    }
}
