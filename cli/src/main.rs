mod commands;
mod terminal;

use commands::{CommandLine, Commands, add, test};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Add {
            hosts,
            server,
            strict_errors,
        } => add::add(hosts, server, strict_errors).await,
        Commands::Test { server, port } => test::test(server, port).await,
    }
}
