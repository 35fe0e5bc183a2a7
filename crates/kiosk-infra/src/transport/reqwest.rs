//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: request assembly, the
//! client-level timeout, and the timeout/offline/failure split on errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use kiosk_core::ports::{HttpMethod, HttpTransport, RawResponse, RequestParts, TransportError};

/// Transport adapter issuing requests through a shared reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, keeping whatever policy it was built with.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Offline(error.to_string())
    } else {
        TransportError::Failed(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestParts) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
