use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use routerfed_application::ports::{AdminClientFactory, AdminClientHandle};
use routerfed_domain::DomainError;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RefreshLocalResponse {
    refreshed: bool,
}

/// HTTP connection to one router's admin API. Built once per endpoint and
/// reused across cycles until the cache evicts it.
pub struct HttpAdminClient {
    address: String,
    http: reqwest::Client,
    closed: AtomicBool,
}

impl HttpAdminClient {
    fn new(address: &str, request_timeout: Duration) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| DomainError::AdminTransport {
                endpoint: address.to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self {
            address: address.to_string(),
            http,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl AdminClientHandle for HttpAdminClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn refresh_mount_table(&self) -> Result<bool, DomainError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DomainError::AdminTransport {
                endpoint: self.address.clone(),
                detail: "client is closed".to_string(),
            });
        }

        let url = format!("http://{}/api/refresh/local", self.address);
        let response =
            self.http
                .post(&url)
                .send()
                .await
                .map_err(|e| DomainError::AdminTransport {
                    endpoint: self.address.clone(),
                    detail: e.to_string(),
                })?;

        if !response.status().is_success() {
            warn!(
                endpoint = %self.address,
                status = %response.status(),
                "Remote refresh declined"
            );
            return Ok(false);
        }

        let body: RefreshLocalResponse =
            response.json().await.map_err(|e| DomainError::AdminTransport {
                endpoint: self.address.clone(),
                detail: e.to_string(),
            })?;
        Ok(body.refreshed)
    }

    fn close(&self) -> Result<(), DomainError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            // reqwest connections are pooled; marking the handle closed stops
            // further use and the pool drains when the last Arc drops.
            debug!(endpoint = %self.address, "Admin client closed");
        }
        Ok(())
    }
}

/// Factory for [`HttpAdminClient`]s, one per admin address.
pub struct HttpAdminClientFactory {
    request_timeout: Duration,
}

impl HttpAdminClientFactory {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl AdminClientFactory for HttpAdminClientFactory {
    fn create(&self, address: &str) -> Result<Arc<dyn AdminClientHandle>, DomainError> {
        Ok(Arc::new(HttpAdminClient::new(address, self.request_timeout)?))
    }
}
