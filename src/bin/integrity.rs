//! Integrity CLI Binary
//!
//! Command-line interface for manifest-based file verification.

use clap::Parser;
use integrity::cli::{map_error, prompt_command, Cli, RunContext, BANNER};
use integrity::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    println!("{}", BANNER);

    let command = match cli.command {
        Some(command) => command,
        None => match prompt_command() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", map_error(&e));
                process::exit(1);
            }
        },
    };

    let context = match RunContext::new(cli.root.clone()) {
        Ok(ctx) => {
            info!(root = %ctx.root().display(), "Run context initialized");
            ctx
        }
        Err(e) => {
            error!("Error resolving installation root: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args; `--verbose` gates logging
/// entirely, flags override the defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();
    if !cli.verbose {
        config.level = "off".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
