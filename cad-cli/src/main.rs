//! CAD CLI - fetch the dashboard's charts and tables from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cad-cli",
    version,
    about = "Case analytics dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cad_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cad_cmd::run(cli.command).await
}
