//! Main entry point for the skinbound CLI

mod cli;
mod commands;
mod scene;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger; -v/-q override RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        logger.filter_level(log::LevelFilter::Error);
    }
    logger.init();

    match cli.command {
        Commands::Bounds {
            file,
            step_ms,
            radius_scaling,
            json,
        } => commands::bounds::execute(&file, step_ms, radius_scaling.into(), json),
        Commands::Sample {
            file,
            target,
            samples,
            json,
        } => commands::sample::execute(&file, &target, samples, json),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
