use async_trait::async_trait;
use routerfed_application::ports::EndpointDirectory;
use routerfed_domain::{AdminEndpoint, DomainError};

/// Directory backed by the static federation membership in the config file.
/// The list is read fresh each cycle so a future hot-reload of membership
/// needs no coordinator change.
pub struct StaticEndpointDirectory {
    endpoints: Vec<AdminEndpoint>,
}

impl StaticEndpointDirectory {
    pub fn new(addresses: &[String]) -> Self {
        Self {
            endpoints: addresses.iter().map(AdminEndpoint::new).collect(),
        }
    }
}

#[async_trait]
impl EndpointDirectory for StaticEndpointDirectory {
    async fn list_endpoints(&self) -> Result<Vec<AdminEndpoint>, DomainError> {
        Ok(self.endpoints.clone())
    }
}
