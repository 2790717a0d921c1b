use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shopkeep_api::{app, config, database::DatabaseManager};

#[derive(Parser)]
#[command(name = "shopkeep-api", version, about = "E-commerce back-office API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Port to bind, overrides PORT and config
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(port).await,
        Command::Migrate => {
            DatabaseManager::migrate().await?;
            Ok(())
        }
    }
}

async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting shopkeep-api in {:?} mode", config.environment);

    let port = port_override.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("shopkeep-api listening on http://{}", bind_addr);

    axum::serve(listener, app()).await.context("server")?;
    Ok(())
}

fn init_tracing() {
    let default_filter = if config::config().api.enable_request_logging {
        "shopkeep_api=debug,tower_http=debug"
    } else {
        "shopkeep_api=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
