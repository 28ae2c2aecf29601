//! Vista CLI - headless access to the overlay file picker

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{browse, config, ls};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vista")]
#[command(about = "Directory browser and alert overlay for model viewers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory the way the browser shows it
    Ls {
        /// Directory to list (defaults to the configured start directory)
        path: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,
    },

    /// Run a browser session driven by commands on stdin
    Browse {
        /// Model files to load before the session starts
        models: Vec<PathBuf>,

        /// Directory to start in
        #[arg(long)]
        dir: Option<String>,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,

        /// Surface width the panels are centered on
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Surface height the panels are centered on
        #[arg(long, default_value = "720")]
        height: f32,

        /// Refresh the listing when the browsed directory changes
        #[arg(long)]
        watch: bool,
    },

    /// Print the resolved configuration as TOML
    Config {
        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ls {
            path,
            format,
            config,
        } => ls::run(path.as_deref(), &format, config.as_deref()),
        Commands::Browse {
            models,
            dir,
            config,
            width,
            height,
            watch,
        } => browse::run(browse::BrowseArgs {
            models,
            path: dir,
            config,
            width,
            height,
            watch,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
