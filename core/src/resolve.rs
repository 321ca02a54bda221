//! Async name resolution for parsed host addresses.

use std::net::{IpAddr, SocketAddr};

use tokio::net::lookup_host;

use tethr_common::network::address::{HostAddress, HostSpec};

/// First resolved socket address for `address`, or `None` when the name
/// does not resolve. Resolvers return answers in preference order, so
/// the first one wins.
pub async fn first_socket_addr(address: &HostAddress) -> Option<SocketAddr> {
    match &address.host {
        HostSpec::Ip(ip) => Some(SocketAddr::new(*ip, address.port)),
        HostSpec::Name(name) => lookup_host((name.as_str(), address.port))
            .await
            .ok()?
            .next(),
    }
}

/// First resolved IP for `address`.
pub async fn first_ip(address: &HostAddress) -> Option<IpAddr> {
    let socket_addr: Option<SocketAddr> = first_socket_addr(address).await;
    socket_addr.map(|sock| sock.ip())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
