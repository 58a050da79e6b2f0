use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use odh_cli::cli::{execute, watch, CliCommand};
use odh_core::models::FilterType;
use odh_core::tracing_setup::init_tracing_with_service;
use odh_core::{ConnectionTypeApi, CoreConfig, FilterData, HttpConnectionTypeApi};

#[derive(Parser)]
#[command(name = "odh-cli")]
#[command(about = "Manage dashboard connection types from the command line")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (baseUrl, token, pollIntervalMs)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Dashboard backend URL, overrides config and env
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long)]
    token: Option<String>,

    /// Seconds enable/disable wait for a refresh to show the change
    #[arg(long, default_value_t = 30)]
    settle_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Match display name or description
    #[arg(long, short = 'k')]
    keyword: Option<String>,

    /// Match the creator username
    #[arg(long)]
    created_by: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> FilterData {
        let mut filter = FilterData::default();
        filter.set(FilterType::Keyword, self.keyword);
        filter.set(FilterType::CreatedBy, self.created_by);
        filter
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List connection types
    List(FilterArgs),

    /// Enable a connection type
    Enable { name: String },

    /// Disable a connection type
    Disable { name: String },

    /// Delete a connection type
    Delete {
        name: String,
        /// Confirm the deletion
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Create a connection type
    Create {
        name: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        creator: Option<String>,
        #[arg(long)]
        enabled: bool,
    },

    /// Print the list every time it changes, until Ctrl+C
    Watch(FilterArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing_with_service("odh-cli") {
        eprintln!("Warning: {e:#}");
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = CoreConfig::resolve(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if cli.token.is_some() {
        config.token = cli.token;
    }

    let api: Arc<dyn ConnectionTypeApi> = Arc::new(
        HttpConnectionTypeApi::new(&config).context("Invalid backend configuration")?,
    );

    let command = match cli.command {
        Commands::Watch(filter) => {
            let mut stdout = std::io::stdout();
            return watch(
                api,
                config.poll_interval(),
                filter.into_filter(),
                &mut stdout,
                tokio::signal::ctrl_c(),
            )
            .await;
        }
        Commands::List(filter) => CliCommand::List {
            filter: filter.into_filter(),
        },
        Commands::Enable { name } => CliCommand::SetEnabled {
            name,
            enabled: true,
        },
        Commands::Disable { name } => CliCommand::SetEnabled {
            name,
            enabled: false,
        },
        Commands::Delete { name, yes } => CliCommand::Delete {
            name,
            confirmed: yes,
        },
        Commands::Create {
            name,
            display_name,
            description,
            creator,
            enabled,
        } => CliCommand::Create {
            name,
            display_name,
            description,
            creator,
            enabled,
        },
    };

    let result = execute(command, api, Duration::from_secs(cli.settle_secs)).await?;
    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
