//! RouterFed Application Layer
//!
//! Ports consumed by the adapters plus the refresh coordinator use case.
pub mod ports;
pub mod refresh;

pub use refresh::{RefreshCoordinator, RefreshTask, TaskResult};
