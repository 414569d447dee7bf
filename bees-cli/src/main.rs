//! Bees CLI - Command line tool for the honeybee colony dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bees-cli",
    version,
    about = "Honeybee colony dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: bees_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[Bees] starting bees-cli {}", env!("CARGO_PKG_VERSION"));
    bees_cmd::run(cli.command).await
}
