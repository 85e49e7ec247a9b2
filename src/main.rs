use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use newsdesk::api::NewsClient;
use newsdesk::app::{App, AppEvent};
use newsdesk::config::Config;
use newsdesk::ui;

/// Get the default config file path (~/.config/newsdesk/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("newsdesk")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "newsdesk", about = "Terminal news reader with categories and bookmarks")]
struct Args {
    /// Base URL of the news API (overrides the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file path [default: ~/.config/newsdesk/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Initialize tracing. The filter comes from `RUST_LOG`.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    let client = NewsClient::new(&config.api_base_url, config.request_timeout())
        .context("Failed to create API client")?;
    tracing::info!(base_url = %client.base_url(), "Starting newsdesk");

    let mut app = App::new(client, &config);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // The first article list is requested once categories arrive.
    ui::load_categories(&mut app, &event_tx);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
