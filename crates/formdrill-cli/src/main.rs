//! formdrill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "formdrill", version, about = "Formula memorization drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive drill, then print statistics
    Drill {
        /// Formula file (topic|name|answer per line)
        #[arg(long)]
        formulas: Option<PathBuf>,

        /// Topics to drill (comma-separated, default: all)
        #[arg(long)]
        topics: Option<String>,

        /// Count only the last N answers per formula in the statistics
        #[arg(long)]
        last: Option<usize>,

        /// Statistics format: text, json, html
        #[arg(long)]
        format: Option<String>,

        /// Write statistics to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List topics in a formula file
    Topics {
        /// Formula file (topic|name|answer per line)
        #[arg(long)]
        formulas: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and formula file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("formdrill=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Drill {
            formulas,
            topics,
            last,
            format,
            output,
            config,
        } => commands::drill::execute(formulas, topics, last, format, output, config),
        Commands::Topics { formulas, config } => commands::topics::execute(formulas, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
