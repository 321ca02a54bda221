//! # Host Address Model
//!
//! Parses the free-form text a user types when adding a host by hand.
//!
//! Accepted forms:
//! * A bare host: `192.168.1.50`, `steambox`, `[::1]`.
//! * A host with an explicit port: `192.168.1.50:47990`, `[::1]:47990`.
//! * A bare IPv6 literal without brackets: `fe80::1`.
//!
//! Parsing piggybacks on URL authority syntax by prefixing a dummy scheme,
//! so the accepted envelope matches what a URI parser allows. Bare IPv6
//! literals fail that first pass (the colons read as a port separator) and
//! are recovered by retrying with brackets wrapped around the input.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Port the host's control service listens on when none is given.
pub const DEFAULT_CONTROL_PORT: u16 = 47989;

/// Scheme prepended to raw input so it parses as a URL authority.
const DUMMY_SCHEME: &str = "tethr";

/// A host as the user named it: either an IP literal or a name that
/// still needs resolving.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostSpec {
    Ip(IpAddr),
    Name(String),
}

/// A parsed host plus the port to contact it on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostAddress {
    pub host: HostSpec,
    pub port: u16,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid host address: {input}")]
pub struct HostParseError {
    pub input: String,
}

impl HostAddress {
    /// Parses raw user input into a host and port.
    ///
    /// Returns `None` when the input cannot name a host under either the
    /// direct or the bracket-wrapped reading. Never panics, performs no
    /// I/O, and does not resolve names.
    pub fn parse(raw_input: &str) -> Option<HostAddress> {
        parse_as_authority(raw_input).or_else(|| parse_as_authority(&format!("[{raw_input}]")))
    }
}

fn parse_as_authority(candidate: &str) -> Option<HostAddress> {
    let url: Url = Url::parse(&format!("{DUMMY_SCHEME}://{candidate}")).ok()?;
    let host_str: &str = url.host_str()?;
    if host_str.is_empty() {
        return None;
    }

    let port: u16 = url.port().unwrap_or(DEFAULT_CONTROL_PORT);
    Some(HostAddress {
        host: host_spec_from(host_str),
        port,
    })
}

/// IPv6 hosts come back bracketed from the URL layer; strip the brackets
/// before deciding whether the text is an IP literal or a name.
fn host_spec_from(host_str: &str) -> HostSpec {
    let bare: &str = host_str
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host_str);

    match bare.parse::<IpAddr>() {
        Ok(ip) => HostSpec::Ip(ip),
        Err(_) => HostSpec::Name(bare.to_string()),
    }
}

impl FromStr for HostAddress {
    type Err = HostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostAddress::parse(s).ok_or_else(|| HostParseError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for HostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostSpec::Ip(ip) => write!(f, "{ip}"),
            HostSpec::Name(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            HostSpec::Ip(IpAddr::V6(ip)) => write!(f, "[{ip}]:{}", self.port),
            host => write!(f, "{host}:{}", self.port),
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
