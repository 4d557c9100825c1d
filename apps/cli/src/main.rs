mod cli;
mod commands;
mod config;
mod main_lib;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::{build_state, init_tracing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();

    let state = build_state(&config)?;
    let output = commands::run(&cli.command, &state)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
