pub mod add;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tethr")]
#[command(about = "Add remote streaming hosts and diagnose why they cannot be reached.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add one or more hosts by address
    #[command(alias = "a")]
    Add {
        /// Host inputs, e.g. "192.168.1.50", "[::1]:47990", "steambox"
        #[arg(required = true)]
        hosts: Vec<String>,
        /// Diagnostic server used for failure analysis
        #[arg(long)]
        server: Option<String>,
        /// Report registration service errors as failures instead of bad input
        #[arg(long)]
        strict_errors: bool,
    },
    /// Check whether this network blocks the streaming ports
    #[command(alias = "t")]
    Test {
        /// Diagnostic server to probe
        #[arg(long)]
        server: Option<String>,
        /// Reference port proving the server is reachable
        #[arg(long)]
        port: Option<u16>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
