//! # TCP Connect Probe
//!
//! Built-in [`ConnectivityProbe`] backend. One timed connect to the
//! reference port decides whether the diagnostic server is reachable at
//! all; after that, every TCP port of interest gets its own timed
//! connect and a failed handshake marks the port blocked.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use tethr_common::probing::{ConnectivityProbe, KNOWN_PORTS, PortFlags, Transport};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Probes ports by completing TCP handshakes against the diagnostic
/// server.
///
/// UDP flags in the interest set are left untested rather than reported
/// blocked: without a cooperating echo service a connectionless probe
/// cannot tell "blocked" from "no answer".
pub struct TcpConnectProbe {
    connect_timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    async fn can_connect(&self, server: &str, port: u16) -> bool {
        match timeout(self.connect_timeout, TcpStream::connect((server, port))).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(_)) | Err(_) => false,
        }
    }
}

impl Default for TcpConnectProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectivityProbe for TcpConnectProbe {
    async fn test_ports(
        &self,
        server: &str,
        reference_port: u16,
        interest: PortFlags,
    ) -> PortFlags {
        if !self.can_connect(server, reference_port).await {
            debug!(server, reference_port, "diagnostic server unreachable");
            return PortFlags::INCONCLUSIVE;
        }

        let mut blocked: PortFlags = PortFlags::NONE;
        for (flag, transport, port) in KNOWN_PORTS {
            if *transport != Transport::Tcp || !interest.intersects(*flag) {
                continue;
            }
            if !self.can_connect(server, *port).await {
                debug!(server, port, "port looks blocked from here");
                blocked |= *flag;
            }
        }

        blocked
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
