use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vizsift::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "vizsift")]
#[command(about = "Pull metrics, tables, lists and time series out of AI responses and pick charts for them")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the data extracted from a response as JSON
    Extract {
        /// Response file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Run extraction and chart selection over a response
    Visualize {
        /// Response file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Conversation context passed to the chart selector
        #[arg(long, default_value = "")]
        context: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Read streamed fragments from stdin (one per line) and chart at EOF
    Stream {
        /// Conversation context passed to the chart selector
        #[arg(long, default_value = "")]
        context: String,
        /// Output format: json (default), table, csv
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Serve the JSON API over HTTP
    Serve {
        /// Listen address (overrides [server].addr)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Show pipeline run statistics
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the annotated default config to ~/.vizsift/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print config and log file locations
    Path,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Extract { file } => cli::run_extract(file.as_deref()),
        Commands::Visualize {
            file,
            context,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_visualize(file.as_deref(), &context, fmt)
        }
        Commands::Stream { context, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stream(&context, fmt)
        }
        Commands::Serve { addr } => {
            let config = config::load();
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            web::serve(&addr, &web::AppState::from_config(&config))
        }
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Path => cli::run_config_path(),
        },
    }
}
