//! # Control Port Registry
//!
//! Stand-in [`HostRegistry`] backend: a host is accepted when its
//! control port completes a TCP handshake. Pairing and certificate
//! exchange belong to a full registration client; wiring one in means
//! swapping this adapter at worker construction, nothing else.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use tethr_common::network::address::HostAddress;
use tethr_common::registry::HostRegistry;

use crate::resolve;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

pub struct ControlPortRegistry {
    connect_timeout: Duration,
}

impl ControlPortRegistry {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for ControlPortRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostRegistry for ControlPortRegistry {
    /// Unresolvable names are service errors (`Err`), a dead control
    /// port is an explicit rejection (`Ok(false)`).
    async fn add_host(&self, address: &HostAddress) -> anyhow::Result<bool> {
        let socket_addr: SocketAddr = resolve::first_socket_addr(address)
            .await
            .with_context(|| format!("unable to resolve {address}"))?;

        match timeout(self.connect_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => Ok(true),
            Ok(Err(e)) => {
                debug!(%socket_addr, "control port did not answer: {e}");
                Ok(false)
            }
            Err(_elapsed) => Ok(false),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
