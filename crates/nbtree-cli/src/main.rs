use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod config;
mod render;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::CliConfig::discover(cli.config.as_deref())?;
    if cli.no_color {
        config.color = false;
    }
    if let Some(on) = config.color_override() {
        colored::control::set_override(on);
    }

    commands::run_command(cli, &config)
}
