//! # Addition Outcomes
//!
//! The closed set of results a host addition can end in, and the
//! user-facing text for each. Every submitted input maps to exactly one
//! of these.

use crate::probing::PortFlags;

/// Why an addition succeeded or failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The registration service accepted the host.
    Success,
    /// The input never named a reachable host: unparseable text, an
    /// unresolvable name, or a registration service error.
    InvalidInput,
    /// The target is a private address on a subnet this machine is not
    /// connected to.
    WrongSubnet,
    /// The current network blocks the listed streaming ports.
    BlockedPorts(PortFlags),
    /// The host was reachable enough to be diagnosed but the addition
    /// still failed.
    GenericFailure,
}

/// Terminal result for one submitted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddReport {
    /// The raw text the user submitted, unchanged.
    pub input: String,
    pub outcome: AddOutcome,
}

impl AddOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AddOutcome::Success)
    }

    /// One-line verdict for this outcome.
    pub fn summary(&self) -> String {
        match self {
            AddOutcome::Success => "Host added successfully".to_string(),
            AddOutcome::InvalidInput => "Unknown host".to_string(),
            AddOutcome::WrongSubnet => "Address unreachable from this network".to_string(),
            AddOutcome::BlockedPorts(flags) => {
                format!("Network test blocked: {}", flags.describe(", "))
            }
            AddOutcome::GenericFailure => "Failed to add host".to_string(),
        }
    }

    /// What the user can do about it. Empty on success.
    pub fn hint(&self) -> &'static str {
        match self {
            AddOutcome::Success => "",
            AddOutcome::InvalidInput => "Check the address for typos and try again",
            AddOutcome::WrongSubnet => {
                "The target sits on a different subnet. Join the same network as the host"
            }
            AddOutcome::BlockedPorts(_) => {
                "This network blocks the streaming ports listed above. Open them in the \
                 firewall or switch networks"
            }
            AddOutcome::GenericFailure => {
                "Make sure the host is awake and its streaming service is running, then retry"
            }
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
