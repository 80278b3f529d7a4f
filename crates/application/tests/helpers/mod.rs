#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use routerfed_application::ports::{
    AdminClientHandle, ClientCachePort, EndpointDirectory, ManagerFactory, MountTableManager,
};
use routerfed_domain::{AdminEndpoint, DomainError, RefreshTarget};
use tokio::time::sleep;

pub struct MockEndpointDirectory {
    addresses: Mutex<Vec<String>>,
    list_delay: Duration,
    should_fail: Mutex<bool>,
    call_count: AtomicU64,
}

impl MockEndpointDirectory {
    pub fn new(addresses: &[&str]) -> Self {
        Self {
            addresses: Mutex::new(addresses.iter().map(|a| a.to_string()).collect()),
            list_delay: Duration::ZERO,
            should_fail: Mutex::new(false),
            call_count: AtomicU64::new(0),
        }
    }

    /// Slow listing keeps the gate held long enough for concurrency tests to
    /// observe coalescing deterministically.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EndpointDirectory for MockEndpointDirectory {
    async fn list_endpoints(&self) -> Result<Vec<AdminEndpoint>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.list_delay.is_zero() {
            sleep(self.list_delay).await;
        }
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::DirectoryUnavailable(
                "store unreachable".to_string(),
            ));
        }
        Ok(self
            .addresses
            .lock()
            .unwrap()
            .iter()
            .map(AdminEndpoint::new)
            .collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ManagerBehavior {
    Succeed,
    Reject,
    Error,
    Hang(Duration),
}

pub struct MockManager {
    target: String,
    behavior: ManagerBehavior,
    refresh_count: Arc<AtomicU64>,
}

#[async_trait]
impl MountTableManager for MockManager {
    async fn refresh(&self) -> Result<bool, DomainError> {
        self.refresh_count.fetch_add(1, Ordering::Relaxed);
        match self.behavior {
            ManagerBehavior::Succeed => Ok(true),
            ManagerBehavior::Reject => Ok(false),
            ManagerBehavior::Error => Err(DomainError::AdminTransport {
                endpoint: self.target.clone(),
                detail: "connection reset".to_string(),
            }),
            ManagerBehavior::Hang(how_long) => {
                sleep(how_long).await;
                Ok(true)
            }
        }
    }
}

/// Factory handing out managers whose behavior is keyed by the resolved
/// target, with a shared refresh-call counter across all of them.
pub struct MockManagerFactory {
    default_behavior: ManagerBehavior,
    behaviors: Mutex<HashMap<String, ManagerBehavior>>,
    refresh_count: Arc<AtomicU64>,
    resolved_targets: Mutex<Vec<RefreshTarget>>,
}

impl MockManagerFactory {
    pub fn all(behavior: ManagerBehavior) -> Self {
        Self {
            default_behavior: behavior,
            behaviors: Mutex::new(HashMap::new()),
            refresh_count: Arc::new(AtomicU64::new(0)),
            resolved_targets: Mutex::new(Vec::new()),
        }
    }

    /// Override the behavior for one target (remote address, or "local").
    pub fn with_behavior(self, target: &str, behavior: ManagerBehavior) -> Self {
        self.behaviors
            .lock()
            .unwrap()
            .insert(target.to_string(), behavior);
        self
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::Relaxed)
    }

    pub fn resolved_targets(&self) -> Vec<RefreshTarget> {
        self.resolved_targets.lock().unwrap().clone()
    }
}

impl ManagerFactory for MockManagerFactory {
    fn manager(&self, target: &RefreshTarget) -> Arc<dyn MountTableManager> {
        self.resolved_targets.lock().unwrap().push(target.clone());
        let key = target.to_string();
        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(self.default_behavior);
        Arc::new(MockManager {
            target: key,
            behavior,
            refresh_count: Arc::clone(&self.refresh_count),
        })
    }
}

struct MockClientHandle {
    address: String,
}

#[async_trait]
impl AdminClientHandle for MockClientHandle {
    fn address(&self) -> &str {
        &self.address
    }

    async fn refresh_mount_table(&self) -> Result<bool, DomainError> {
        Ok(true)
    }

    fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MockClientCache {
    invalidations: Mutex<Vec<String>>,
    warmed: AtomicU64,
}

impl MockClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidations(&self) -> Vec<String> {
        self.invalidations.lock().unwrap().clone()
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.lock().unwrap().len()
    }
}

impl ClientCachePort for MockClientCache {
    fn get_or_create(
        &self,
        address: &str,
    ) -> Result<Arc<dyn AdminClientHandle>, DomainError> {
        Ok(Arc::new(MockClientHandle {
            address: address.to_string(),
        }))
    }

    fn invalidate(&self, address: &str) {
        self.invalidations.lock().unwrap().push(address.to_string());
    }

    fn warm(&self, endpoints: &[AdminEndpoint]) -> usize {
        self.warmed.fetch_add(endpoints.len() as u64, Ordering::Relaxed);
        endpoints.len()
    }
}
