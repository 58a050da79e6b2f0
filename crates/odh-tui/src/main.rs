mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use odh_core::tracing_setup::{init_file_tracing, LOG_FILE_ENV};
use odh_core::{ConnectionTypeApi, CoreConfig, HttpConnectionTypeApi, Poller};

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser, Debug)]
#[command(name = "odh-tui")]
#[command(about = "Terminal dashboard for managing connection types")]
struct Args {
    /// Path to config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dashboard backend URL, overrides config and env
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long)]
    token: Option<String>,
}

fn log_path() -> PathBuf {
    std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("odh-dashboard")
                .join("odh-tui.log")
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the UI, so logs always go to a file
    init_file_tracing("odh-tui", &log_path())?;

    let mut config = CoreConfig::resolve(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.token.is_some() {
        config.token = args.token;
    }

    let api: Arc<dyn ConnectionTypeApi> = Arc::new(
        HttpConnectionTypeApi::new(&config).context("Invalid backend configuration")?,
    );
    let poller = Poller::connection_types(Arc::clone(&api), config.poll_interval());

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let mut app = App::new();
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app, api, &poller).await;

    poller.stop();
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
