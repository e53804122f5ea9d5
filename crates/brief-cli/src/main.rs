//! brief - conversational project intake client

mod config;
mod endpoint;
mod forms;
mod interactive;
mod ui;

use brief_api::Client;
use brief_flow::{ConversationMachine, Flow, Transport};
use brief_tui::Theme;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "brief=debug,brief_api=debug,brief_flow=debug";

/// brief - tell us about your project, get an estimate
#[derive(Parser, Debug)]
#[command(name = "brief")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the intake service
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Use the light color theme
    #[arg(long)]
    light: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

/// Install the tracing subscriber. Logs go to a file in TUI mode so they do
/// not draw over the alternate screen.
fn init_tracing(verbose: bool, to_file: bool) -> anyhow::Result<()> {
    if !verbose {
        return Ok(());
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if to_file {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brief");
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("brief.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn pick_theme(light: bool, configured: Option<&str>) -> Theme {
    if light {
        return Theme::light();
    }
    match configured {
        Some(name) => Theme::by_name(name).unwrap_or_else(|| {
            eprintln!("Warning: Unknown theme '{}', using dark", name);
            Theme::dark()
        }),
        None => Theme::default(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let cfg = config::Config::load();

    let use_tui = !args.no_tui && cfg.tui.unwrap_or(true) && std::io::stdout().is_terminal();
    init_tracing(args.verbose, use_tui)?;

    // CLI flag, then environment, then config file
    let base_url = endpoint::resolve_base_url(
        args.api_url.as_deref(),
        cfg.api_url.as_deref(),
        |key| std::env::var(key).ok(),
    );
    let timeout = args.timeout.map(Duration::from_secs).or(cfg.timeout());
    let client = match timeout {
        Some(timeout) => Client::with_timeout(&base_url, timeout)?,
        None => Client::new(&base_url)?,
    };
    tracing::info!("Using intake service at {}", client.base_url());

    let base_url = client.base_url().to_string();
    let transport: Arc<dyn Transport> = Arc::new(client);
    let flow_config = cfg.flow_config();

    if use_tui {
        let theme = pick_theme(args.light, cfg.theme.as_deref());
        let state = ui::TuiState::new(
            ConversationMachine::new(flow_config),
            transport,
            theme,
            base_url,
        );
        return ui::run_tui(state).await;
    }

    interactive::run_interactive(Flow::new(flow_config, transport), &base_url).await
}
