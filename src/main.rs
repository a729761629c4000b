//! maintctl - equipment risk monitoring tool
//!
//! A command-line tool for sampling equipment sensors, scoring failure risk
//! and managing maintenance alerts.

use clap::Parser;
use maintctl::cli::args::{generate_completions, Cli, Commands};
use maintctl::commands::{
    load_config, run_alerts, run_classify, run_config, run_equipment, run_monitor, run_sample,
};
use maintctl::config::Config;
use maintctl::error::{AppError, ConfigError, ProviderError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config before logging so both -v and general.verbose apply
    let result = match &cli.command {
        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
        _ => match load_config(&cli) {
            Ok(config) => {
                init_logging(config.general.log_level());
                run(&cli, &config)
            }
            Err(e) => {
                init_logging(if cli.verbose {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Warn
                });
                Err(e)
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

/// Initialize env_logger at `level`; RUST_LOG directives take precedence
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    match &cli.command {
        Commands::Equipment => run_equipment(config, cli.format),

        Commands::Alerts(args) => run_alerts(args, config, cli.format),

        Commands::Sample(args) => run_sample(args, config, cli.format),

        Commands::Classify(args) => run_classify(args, config, cli.format),

        Commands::Monitor(args) => run_monitor(args, config, cli.format),

        Commands::Config => run_config(config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::EquipmentNotFound(_) => {
            eprintln!();
            eprintln!("Hint: Run 'maintctl equipment' to list catalogued equipment.");
        }
        AppError::NoEquipmentSelected => {
            eprintln!();
            eprintln!("Hint: Pass --equipment <ID> or set monitoring.default_equipment.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the MAINTCTL_CONFIG variable.");
        }
        AppError::Provider(ProviderError::Unavailable { .. }) => {
            eprintln!();
            eprintln!("Hint: Check the --catalog path, or omit it to use the demo fleet.");
        }
        _ => {}
    }
}
