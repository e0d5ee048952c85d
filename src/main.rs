//! Trellis - file-system routing for pre-rendered sites.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use trellis::cli::{self, Cli, Commands};
use trellis::config::{ConfigHandle, SiteConfig};
use trellis::{core, logger};

fn main() {
    if let Err(err) = run() {
        cli::report_error(&err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Generate { .. } => cli::generate::run_generate(&ConfigHandle::new(config), &cli),
        Commands::Routes { args } => cli::routes::run_routes(args, &config),
        Commands::Navigate { args } => cli::navigate::run_navigate(args, &config),
    }
}
