//! HTTP client with scope enforcement and serialized probing

use crate::core::gate::ProbeGate;
use crate::core::scope::Scope;
use crate::error::TransportError;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use anyhow::Result;
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    scope: Scope,
    gate: ProbeGate,
}

impl HttpClient {
    pub fn new(scope: Scope, gate: ProbeGate, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            scope,
            gate,
        })
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        if !self.scope.is_in_scope(&req.url) {
            return Err(TransportError::OutOfScope(req.url.to_string()));
        }

        // held until the body is read, one probe in flight at a time
        let _guard = self.gate.enter().await;

        let start = Instant::now();
        let response = self.client.request(req.method, req.url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body_len: body.len(),
            elapsed: start.elapsed(),
        })
    }
}
