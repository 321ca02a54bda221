//! Standalone network test: probe every known streaming port and render
//! a verdict, independent of any host addition.

use tethr_common::config::Config;
use tethr_common::probing::{ConnectivityProbe, PortFlags};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetTestVerdict {
    /// Every known port was reachable.
    Passed,
    /// The listed ports look blocked from this network.
    Blocked(PortFlags),
    /// The diagnostic server itself was unreachable, so nothing can be
    /// said about individual ports.
    Inconclusive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetTestReport {
    /// Diagnostic server the test ran against.
    pub server: String,
    pub verdict: NetTestVerdict,
}

impl NetTestReport {
    /// Plain-text summary, blocked ports one per line.
    pub fn summary(&self) -> String {
        match &self.verdict {
            NetTestVerdict::Passed => {
                "Network test passed. This network appears ready for streaming.".to_string()
            }
            NetTestVerdict::Blocked(flags) => {
                format!(
                    "Network test failed. Blocked ports:\n{}",
                    flags.describe("\n")
                )
            }
            NetTestVerdict::Inconclusive => {
                "Network test inconclusive. The diagnostic server could not be reached."
                    .to_string()
            }
        }
    }
}

/// Probes the full port set against the configured diagnostic server.
pub async fn run_network_test(probe: &dyn ConnectivityProbe, config: &Config) -> NetTestReport {
    let result: PortFlags = probe
        .test_ports(&config.test_server, config.test_port, PortFlags::ALL)
        .await;

    let verdict: NetTestVerdict = if result.is_inconclusive() {
        NetTestVerdict::Inconclusive
    } else if result.is_empty() {
        NetTestVerdict::Passed
    } else {
        NetTestVerdict::Blocked(result)
    };

    NetTestReport {
        server: config.test_server.clone(),
        verdict,
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
