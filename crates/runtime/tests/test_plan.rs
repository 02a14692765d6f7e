use std::time::Duration;

use anyhow::{Context, Result};
use chathub_config::{AppConfig, HubConfig};
use chathub_gateway::{ClientEvent, ServerEvent};
use chathub_runtime::{telemetry, HubServices};
use tokio::time::timeout;

fn build_config(max_messages_per_chat: Option<usize>) -> AppConfig {
    AppConfig {
        hub: HubConfig {
            max_messages_per_chat,
        },
        ..AppConfig::default()
    }
}

fn initialise(config: &AppConfig) -> Result<HubServices> {
    HubServices::initialise(config).context("failed to initialise hub services")
}

fn send(text: &str) -> ClientEvent {
    ClientEvent::SendMessage {
        sender_id: Some("a@x".into()),
        receiver_id: Some("b@x".into()),
        text: Some(text.into()),
        timestamp: None,
        reply_to: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_builds_an_empty_hub() -> Result<()> {
    let services = initialise(&AppConfig::default())?;
    let stats = services.state.stats().await;

    assert_eq!(stats.users, 0);
    assert_eq!(stats.groups, 0);
    assert_eq!(stats.messages, 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_applies_history_retention() -> Result<()> {
    let services = initialise(&build_config(Some(2)))?;
    let (session, _rx) = services.state.connect().await;

    for text in ["one", "two", "three"] {
        services.state.dispatch(&session, send(text)).await;
    }

    assert_eq!(services.state.stats().await.messages, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_without_retention_keeps_everything() -> Result<()> {
    let services = initialise(&build_config(None))?;
    let (session, _rx) = services.state.connect().await;

    for index in 0..50 {
        services.state.dispatch(&session, send(&format!("m{index}"))).await;
    }

    assert_eq!(services.state.stats().await.messages, 50);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cloned_services_share_one_hub() -> Result<()> {
    let services = initialise(&AppConfig::default())?;
    let clone = services.clone();
    let (session, mut rx) = services.state.connect().await;

    clone
        .state
        .dispatch(
            &session,
            ClientEvent::Register {
                email: Some("a@x".into()),
                name: Some("Alice".into()),
                username: None,
                avatar: None,
            },
        )
        .await;

    let first = timeout(Duration::from_secs(1), rx.recv())
        .await
        .context("no event delivered")?;
    assert!(matches!(first, Some(ServerEvent::UsersList(ref users)) if users.len() == 1));
    assert_eq!(services.state.stats().await.online, 1);
    Ok(())
}

#[test]
fn init_tracing_only_installs_once() {
    let _ = telemetry::init_tracing();
    assert!(telemetry::init_tracing().is_err());
}
