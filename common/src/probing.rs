//! # Connectivity Probing
//!
//! Bitmask vocabulary for the well-known streaming ports and the trait a
//! probe backend implements. The bit layout is wire-compatible with the
//! established streaming clients: TCP ports occupy the low byte, UDP
//! ports the second byte, and the all-ones value doubles as the
//! "diagnostic server unreachable" sentinel.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use async_trait::async_trait;

/// Set of well-known streaming ports, one bit per port.
///
/// As a probe *result*, bits mark blocked ports: empty means every
/// tested port was reachable, and [`PortFlags::INCONCLUSIVE`] means the
/// probe could not reach the diagnostic server at all. The sentinel
/// shares its value with [`PortFlags::ALL`]; only probe results should
/// be asked [`PortFlags::is_inconclusive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortFlags(u32);

impl PortFlags {
    pub const NONE: PortFlags = PortFlags(0);
    pub const TCP_47984: PortFlags = PortFlags(0x0001);
    pub const TCP_47989: PortFlags = PortFlags(0x0002);
    pub const TCP_48010: PortFlags = PortFlags(0x0004);
    pub const UDP_47998: PortFlags = PortFlags(0x0100);
    pub const UDP_47999: PortFlags = PortFlags(0x0200);
    pub const UDP_48000: PortFlags = PortFlags(0x0400);
    pub const UDP_48010: PortFlags = PortFlags(0x0800);
    pub const ALL: PortFlags = PortFlags(0xFFFF_FFFF);
    pub const INCONCLUSIVE: PortFlags = PortFlags(0xFFFF_FFFF);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> PortFlags {
        PortFlags(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_inconclusive(self) -> bool {
        self.0 == Self::INCONCLUSIVE.0
    }

    pub const fn contains(self, other: PortFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: PortFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Human-readable list of the known ports present in this set, one
    /// entry per port, joined by `separator`.
    pub fn describe(self, separator: &str) -> String {
        let entries: Vec<String> = KNOWN_PORTS
            .iter()
            .filter(|(flag, _, _)| self.intersects(*flag))
            .map(|(_, transport, port)| format!("{transport} {port}"))
            .collect();
        entries.join(separator)
    }
}

impl BitOr for PortFlags {
    type Output = PortFlags;

    fn bitor(self, rhs: PortFlags) -> PortFlags {
        PortFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for PortFlags {
    fn bitor_assign(&mut self, rhs: PortFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PortFlags {
    type Output = PortFlags;

    fn bitand(self, rhs: PortFlags) -> PortFlags {
        PortFlags(self.0 & rhs.0)
    }
}

impl fmt::Display for PortFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inconclusive() {
            return write!(f, "inconclusive");
        }
        if self.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", self.describe(", "))
    }
}

/// Transport protocol of a well-known port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "TCP"),
            Transport::Udp => write!(f, "UDP"),
        }
    }
}

/// Flag, transport, and port number for every well-known streaming port.
pub const KNOWN_PORTS: &[(PortFlags, Transport, u16)] = &[
    (PortFlags::TCP_47984, Transport::Tcp, 47984),
    (PortFlags::TCP_47989, Transport::Tcp, 47989),
    (PortFlags::TCP_48010, Transport::Tcp, 48010),
    (PortFlags::UDP_47998, Transport::Udp, 47998),
    (PortFlags::UDP_47999, Transport::Udp, 47999),
    (PortFlags::UDP_48000, Transport::Udp, 48000),
    (PortFlags::UDP_48010, Transport::Udp, 48010),
];

/// Active reachability probe against a diagnostic server.
///
/// The outer system decides *when* to probe and what the answer means;
/// implementations only answer which of the ports in `interest` look
/// blocked from here.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Probes `server` and reports the subset of `interest` that is
    /// blocked, [`PortFlags::NONE`] when everything tested is open, or
    /// [`PortFlags::INCONCLUSIVE`] when `server` itself could not be
    /// reached on `reference_port`.
    async fn test_ports(
        &self,
        server: &str,
        reference_port: u16,
        interest: PortFlags,
    ) -> PortFlags;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
