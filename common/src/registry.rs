//! Boundary to the registration service that actually performs an add.

use async_trait::async_trait;

use crate::network::address::HostAddress;

/// The service that registers a host for streaming.
///
/// `Ok(true)` is an accepted add, `Ok(false)` an explicit rejection
/// worth diagnosing, and `Err` a failure inside the service itself
/// (resolution, transport, protocol). Implementations must not panic
/// on unreachable hosts.
#[async_trait]
pub trait HostRegistry: Send + Sync {
    async fn add_host(&self, address: &HostAddress) -> anyhow::Result<bool>;
}
