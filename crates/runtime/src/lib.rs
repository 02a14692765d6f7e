use anyhow::Result;
use chathub_config::AppConfig;
use chathub_gateway::GatewayState;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the server needs at runtime, built once from configuration.
#[derive(Clone)]
pub struct HubServices {
    pub state: GatewayState,
}

impl HubServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let retention = config.hub.max_messages_per_chat;
        let state = GatewayState::with_retention(retention);

        match retention {
            Some(limit) => info!(limit, "hub ready with bounded chat history"),
            None => info!("hub ready with unbounded chat history"),
        }

        Ok(Self { state })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
