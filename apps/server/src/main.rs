use anyhow::Context;
use chathub_config::{load as load_config, AppConfig};
use chathub_gateway::create_router;
use chathub_runtime::{shutdown_signal, telemetry, HubServices};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "chathub")]
#[command(about = "Real-time messaging hub (serves by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP and WebSocket server (default)
    Serve,
    /// Print the resolved configuration as JSON
    PrintConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::PrintConfig => print_config(),
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting chathub");

    let config = load_config().context("failed to load configuration")?;

    let services = HubServices::initialise(&config).context("failed to initialise hub services")?;
    let app = create_router(services.state);

    let address = config.http.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("chathub shut down");
    Ok(())
}

fn print_config() -> anyhow::Result<()> {
    let config: AppConfig = load_config().context("failed to load configuration")?;
    let rendered = serde_json::to_string_pretty(&config).context("failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}
