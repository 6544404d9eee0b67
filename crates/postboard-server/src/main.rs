//! Postboard CLI
//!
//! Runs the HTTP API and offers direct access to the board from the shell.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use postboard_core::Config;

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "postboard")]
#[command(about = "Postboard - a small message board backed by one JSON file")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: ~/.config/postboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Board data file, overrides configuration
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep the board in memory instead of the data file
        #[arg(long)]
        in_memory: bool,
    },
    /// List posts, most recent first
    #[command(alias = "ls")]
    List {
        /// Author name contains (case-insensitive)
        #[arg(short, long)]
        author: Option<String>,
        /// Created on date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Created at time (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Show one post
    Show {
        /// Post ID
        id: u64,
    },
    /// Create a post
    #[command(alias = "add")]
    Create {
        #[arg(short, long)]
        author: String,
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        message: String,
    },
    /// Toggle the like flag of a post
    Like {
        /// Post ID
        id: u64,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID
        id: u64,
    },
    /// Export the board with statistics as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let mut config = tracing::subscriber::with_default(logging::bootstrap(), || {
        Config::load_with_cli_override(cli.config.as_ref())
    })
    .context("Failed to load configuration")?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }

    logging::init(&config.log_level, cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        in_memory: false,
    });

    match command {
        Commands::Serve {
            host,
            port,
            in_memory,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            commands::serve::run(&config, in_memory).await
        }
        Commands::List { author, date, time } => {
            commands::post::list(&config, author, date, time, &output)
        }
        Commands::Show { id } => commands::post::show(&config, id, &output),
        Commands::Create {
            author,
            subject,
            message,
        } => commands::post::create(&config, author, subject, message, &output),
        Commands::Like { id } => commands::post::like(&config, id, &output),
        Commands::Delete { id } => commands::post::delete(&config, id, &output),
        Commands::Export { output: path } => commands::export::run(&config, path, &output),
        Commands::Config => commands::config::show(&config, cli.config.as_ref(), &output),
    }
}
