//! HTTP transport carrying payloads in the injectable parameter

use crate::error::TransportError;
use crate::http::client::HttpClient;
use crate::http::request::HttpRequest;
use crate::sqli::oracle::Transport;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// The vulnerable endpoint and the parameter the payload goes into
pub struct InjectionPoint {
    client: HttpClient,
    base_url: Url,
    parameter: String,
}

impl InjectionPoint {
    pub fn new(client: HttpClient, base_url: Url, parameter: String) -> Self {
        Self {
            client,
            base_url,
            parameter,
        }
    }
}

#[async_trait]
impl Transport for InjectionPoint {
    async fn send(&self, payload: &str) -> Result<Duration, TransportError> {
        let req = HttpRequest::with_param(&self.base_url, &self.parameter, payload);
        let resp = self.client.execute(req).await?;

        tracing::trace!(
            "[HTTP] {} ({} bytes) in {}ms",
            resp.status,
            resp.body_len,
            resp.elapsed.as_millis()
        );

        Ok(resp.elapsed)
    }
}
