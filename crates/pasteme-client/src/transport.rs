//! Request/response channel to the paste service

use pasteme_core::{PasteError, PasteResult};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Status and fully-read body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// One POST of a JSON document; no retries.
pub trait Transport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> PasteResult<HttpReply>;
}

/// Blocking reqwest transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Fails with a config error when the client cannot be built (e.g. a
    /// User-Agent that is not a valid header value); nothing is sent.
    pub fn new(user_agent: &str) -> PasteResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| PasteError::Config(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, timeouts, TLS roots).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> PasteResult<HttpReply> {
        tracing::debug!(url, bytes = body.len(), "sending paste");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| PasteError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| PasteError::Transport(format!("reading response body: {e}")))?;

        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}
