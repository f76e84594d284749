mod app;
mod cli;
mod config;
mod export;
mod logging;
mod renderer;

use anyhow::{Context, Result};
use clap::Parser;
use paddock_protocol::ThemeMode;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(cli.config.as_deref()).context("loading configuration")?;
    let _guard = logging::init_logging(cli.verbosity(), &config.log)?;
    tracing::debug!(?config, "configuration loaded");

    let mode = if cli.light {
        ThemeMode::Light
    } else {
        config.display.theme
    };

    match cli.command.unwrap_or_default() {
        Command::Browse => app::App::new(&config.display, mode).run(),
        Command::Export(args) => export::export(&args, mode),
        Command::Dump(args) => export::dump(&args),
    }
}
