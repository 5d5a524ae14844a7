//! SCD CLI - Command line tool for service center KPI comparisons.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "scd-cli",
    version,
    about = "Service center dashboard KPI toolkit"
)]
struct Cli {
    #[command(flatten)]
    data: scd_cmd::DataOptions,

    #[command(subcommand)]
    command: scd_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("running {:?}", cli.command);
    scd_cmd::run(&cli.data, cli.command)
}
