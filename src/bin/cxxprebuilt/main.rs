//! cxxprebuilt CLI - build and package prebuilt libc++ variants

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use cxxprebuilt::util::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e
            .downcast_ref::<cxxprebuilt::Error>()
            .and_then(|err| err.help())
        {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; RUST_LOG wins when set
    let default_filter = if cli.verbose {
        "cxxprebuilt=debug"
    } else {
        "cxxprebuilt=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Package(args) => commands::package::execute(args, &shell),
        Commands::Plan(args) => commands::plan::execute(args, &shell),
        Commands::Verify(args) => commands::verify::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
