use async_trait::async_trait;
use reqwest::Client;

use crate::api::types::{AdminRequest, AdminResponse};
use crate::error::AdminResult;

/// Executes a single request. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: AdminRequest) -> AdminResult<AdminResponse>;
}

/// HTTP transport backed by a shared reqwest client with default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: AdminRequest) -> AdminResult<AdminResponse> {
        tracing::debug!("{} {}", request.method, request.path());

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("-> {}", status);
        Ok(AdminResponse { status, body })
    }
}
