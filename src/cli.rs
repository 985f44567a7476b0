//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use scanset::output::OutputMode;

/// scanset - Resolve the files a utility-CSS build scans for class names
#[derive(Parser, Debug)]
#[command(
    name = "scanset",
    version,
    about = "Resolve the files a utility-CSS build scans for class names",
    long_about = "Resolve content declarations into the files a style engine scans.\n\n\
                  Declarations come from scanset.toml files. Each file's patterns are\n\
                  anchored at the directory that holds it when `relative = true`."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (repeatable; discovered from the working directory if omitted)
    #[arg(short, long = "config", global = true)]
    pub configs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved files, one per line
    Resolve,

    /// Validate configuration without walking directories
    Check,

    /// Resolve again whenever a watched directory changes
    #[cfg(feature = "watch")]
    Watch {
        /// Milliseconds to wait for further changes before resolving
        #[arg(long, default_value_t = 100)]
        debounce_ms: u64,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Resolve) => commands::resolve(&cli.configs, output_mode),
        Some(Command::Check) => commands::check(&cli.configs, output_mode),
        #[cfg(feature = "watch")]
        Some(Command::Watch { debounce_ms }) => {
            commands::watch(&cli.configs, debounce_ms, output_mode)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("scanset v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("scanset v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'scanset --help' for usage");
                println!("Run 'scanset resolve' to list the files to scan");
            }
            Ok(())
        },
    }
}
