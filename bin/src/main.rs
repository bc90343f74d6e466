//! harmonize CLI - National Grid ESO frequency response auction data.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use harmonize_lib::prelude::*;
use std::time::Duration;

mod commands;
mod display;
mod logging;

use commands::query::QueryArgs;
use commands::report::DaySelection;

#[derive(Parser)]
#[command(name = "harmonize")]
#[command(about = "National Grid ESO frequency response auction data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Datastore record-listing endpoint
    #[arg(long, global = true, env = "HARMONIZE_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,
}

impl Cli {
    /// Client configuration from the global flags.
    fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(self.timeout),
            ..defaults
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available datastore streams
    Streams {
        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show stream details
    Info {
        /// Stream name
        stream: String,
    },

    /// Query a stream and write the records
    Query(QueryArgs),

    /// Frequency response report for Contego and Holes Bay
    Report {
        /// Delivery day to report
        #[arg(short, long, value_enum, default_value = "both")]
        day: DaySelection,

        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    let config = cli.client_config();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Streams { search } => commands::streams::list_streams(search.as_deref()),
        Commands::Info { stream } => commands::info::show_info(&stream, &config),
        Commands::Query(args) => commands::query::query(config, args, cli.quiet).await,
        Commands::Report { day, date, json } => {
            commands::report::report(config, day, date.as_deref(), json, cli.quiet).await
        }
    }
}
