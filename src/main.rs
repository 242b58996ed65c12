use anyhow::Result;
use clap::Parser;
use vendo::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    vendo::telemetry::init(cli.verbose);
    cli.run()
}
