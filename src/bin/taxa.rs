//! Taxa CLI Binary
//!
//! Command-line interface for the category taxonomy engine.

use clap::Parser;
use std::process;
use taxa::config::ConfigLoader;
use taxa::logging::init_logging;
use taxa::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    // Load config first so logging can be initialized before the store is
    // built (store construction is the fail-fast validation point).
    let config = match cli
        .config
        .as_deref()
        .map(ConfigLoader::load_from_file)
        .unwrap_or_else(ConfigLoader::load)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading taxonomy: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
