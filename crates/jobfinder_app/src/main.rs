mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.apply_cli(&cli);
    logging::initialize(config.log, logging::parse_level(&config.log_level));

    match &cli.file {
        Some(path) => app::run_batch(&config, path, cli.copy),
        None => app::run_interactive(&config),
    }
}
