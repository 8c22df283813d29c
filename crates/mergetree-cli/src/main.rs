mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use commands::RunOptions;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init().context("Failed to initialize logging")?;

    let options = RunOptions::resolve(&cli).context("Failed to load configuration")?;

    commands::Merge::execute(&cli.lower, &cli.upper, &options)
        .context("Failed to merge trees")?;

    Ok(())
}
