//! # Failure Diagnosis
//!
//! Turns an explicit registry rejection into something the user can act
//! on. Cheapest check first: a wrong-subnet private address needs no
//! network traffic beyond resolution, and only when the subnet looks
//! fine does the port probe run against the diagnostic server.

use std::net::IpAddr;

use pnet::datalink::NetworkInterface;
use tracing::debug;

use tethr_common::config::Config;
use tethr_common::network::address::HostAddress;
use tethr_common::network::subnet::{self, InterfaceSource};
use tethr_common::outcome::AddOutcome;
use tethr_common::probing::{ConnectivityProbe, PortFlags};

use crate::resolve;

/// Ports the streaming handshake needs before anything else works.
pub const DIAGNOSIS_PORTS: PortFlags =
    PortFlags::from_bits(PortFlags::TCP_47984.bits() | PortFlags::TCP_47989.bits());

/// Classifies a rejected addition.
pub async fn diagnose_failure(
    address: &HostAddress,
    probe: &dyn ConnectivityProbe,
    interfaces: &dyn InterfaceSource,
    config: &Config,
) -> AddOutcome {
    if is_wrong_subnet(address, interfaces).await {
        return AddOutcome::WrongSubnet;
    }

    let blocked: PortFlags = probe
        .test_ports(&config.test_server, config.test_port, DIAGNOSIS_PORTS)
        .await;
    debug!(%blocked, "port probe finished");

    if !blocked.is_inconclusive() && !blocked.is_empty() {
        AddOutcome::BlockedPorts(blocked)
    } else {
        AddOutcome::GenericFailure
    }
}

/// True when the target resolves to a private IPv4 address that no
/// local interface shares a subnet with. Unresolvable targets, IPv6
/// targets, and failed interface enumeration all answer `false`: the
/// check only ever *adds* certainty, never invents it.
pub async fn is_wrong_subnet(address: &HostAddress, source: &dyn InterfaceSource) -> bool {
    let Some(IpAddr::V4(target)) = resolve::first_ip(address).await else {
        return false;
    };

    let Some(interfaces): Option<Vec<NetworkInterface>> = source.interfaces() else {
        return false;
    };

    subnet::is_wrong_subnet_private(target, &interfaces)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
