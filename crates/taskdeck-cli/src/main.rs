//! taskdeck CLI
//!
//! Command-line front end for the shared task list.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskdeck_core::Config;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "taskdeck - a shared task list backed by a hosted store")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    #[command(alias = "ls")]
    List,
    /// Add a new task
    Add {
        /// What needs doing
        description: String,
    },
    /// Toggle a task between done and not done
    Toggle {
        /// Task ID (full UUID or prefix)
        id: String,
    },
    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID (full UUID or prefix)
        id: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, remote_url, api_key, remote_enabled)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config doesn't need the service
    if let Commands::Config { command } = &cli.command {
        return commands::config::handle(command.clone(), &output);
    }

    let config = Config::load()?;
    match cli.command {
        Commands::List => commands::task::list(&config, &output).await,
        Commands::Add { description } => commands::task::add(&config, &description, &output).await,
        Commands::Toggle { id } => commands::task::toggle(&config, &id, &output).await,
        Commands::Delete { id } => commands::task::delete(&config, &id, &output).await,
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
