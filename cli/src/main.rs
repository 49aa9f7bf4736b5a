//! Command-line shell for the Echo anonymous note board.
//!
//! Commands:
//! - feed: print the newest echoes, optionally several pages deep
//! - post: publish a new echo, optionally signed
//! - show: print one echo by id
//! - board: interactive session (load more, post, sign, dismiss)
//!
//! Configuration via environment:
//! - ECHO_API_URL: Base URL of the notes service (default: http://localhost:8080)
//! - ECHO_PAGE_SIZE: Notes per page (default: 20)
//! - LOG_LEVEL / RUST_LOG: Log filter for stderr diagnostics (default: warn)

mod commands;
mod views;

use clap::{Parser, Subcommand};
use echo_client::ClientConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{board::BoardArgs, feed::FeedArgs, post::PostArgs, show::ShowArgs};

/// Echo board CLI
///
/// Read and leave anonymous echoes. Prints JSON by default; pass --human
/// for formatted output.
#[derive(Parser)]
#[command(name = "echoes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes service URL
    #[arg(long, env = "ECHO_API_URL", global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the newest echoes
    Feed(FeedArgs),

    /// Publish a new echo
    Post(PostArgs),

    /// Show a single echo
    Show(ShowArgs),

    /// Interactive board session
    Board(BoardArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.url.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "configuration loaded");

    let url = config.base_url.as_str();
    let result = match cli.command {
        Commands::Feed(args) => commands::feed::execute(url, config.page_size, cli.human, args).await,
        Commands::Post(args) => commands::post::execute(url, cli.human, args).await,
        Commands::Show(args) => commands::show::execute(url, cli.human, args).await,
        Commands::Board(args) => commands::board::execute(url, config.page_size, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Environment configuration with the `--url` flag applied on top.
fn load_config(url: Option<&str>) -> Result<ClientConfig, echo_client::ConfigError> {
    let config = ClientConfig::from_env()?;
    match url {
        Some(url) => config.with_base_url(url),
        None => Ok(config),
    }
}

/// Initialize the tracing subscriber on stderr, leaving stdout for output.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
