//! Native HTTP transport over `reqwest`.

use crate::error::FetchError;
use crate::transport::{RawResponse, Transport, ACCEPT};
use reqwest::header::{ACCEPT as ACCEPT_HEADER, CONTENT_TYPE};
use reqwest::Client;

/// [`Transport`] for the command line tool.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_HEADER, ACCEPT)
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                content_type,
                body: Vec::new(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::decode(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}
