//! `wardcall-station` -- nurse station alert daemon.
//!
//! Runs on a ward nurse station, polls the wardcall backend for
//! outstanding emergency calls assigned to the configured nurse, and
//! raises a desktop notification, an in-app toast and an audible tone
//! for every new call. Optionally registers a push subscription with
//! the backend when the deployment provides the channel material.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default | Description                            |
//! |----------------------|----------|---------|----------------------------------------|
//! | `BACKEND_API_URL`    | yes      | --      | REST base URL, e.g. `http://host:8080/api` |
//! | `NURSE_ID`           | yes      | --      | Integer id of the nurse to poll for    |
//! | `AUTH_TOKEN`         | no       | --      | Bearer token for the nurse session     |
//! | `POLL_INTERVAL_SECS` | no       | `3`     | Seconds between call polls             |
//! | `PUSH_ENDPOINT`      | no       | --      | Push delivery endpoint                 |
//! | `PUSH_P256DH`        | no       | --      | Push encryption key                    |
//! | `PUSH_AUTH`          | no       | --      | Push auth secret                       |

mod config;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardcall_alerts::{toast, AlertDispatcher, AlertGate, DesktopNotifier, Notifier};
use wardcall_calls::observer::{CallObserver, NurseCalls};
use wardcall_client::ApiClient;
use wardcall_core::{PushSubscription, SubscriptionKeys};

use crate::config::StationConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wardcall_station=info,wardcall_calls=info,wardcall_alerts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StationConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("{e}");
        std::process::exit(1);
    });

    tracing::info!(
        nurse_id = config.nurse_id,
        api_url = %config.api_url,
        interval_secs = config.poll_interval.as_secs(),
        push = config.push.is_some(),
        "Starting wardcall-station",
    );

    let mut client = ApiClient::new(&config.api_url);
    if let Some(token) = &config.auth_token {
        client = client.with_token(token.clone());
    }

    let notifier: Arc<dyn Notifier> = Arc::new(DesktopNotifier::new());

    // Unlock the audio channel up front. On a headless or audio-less
    // station the notification and toast channels still run, so a
    // failed unlock degrades rather than aborts.
    let mut gate = AlertGate::new();
    if let Err(e) = gate.enable(notifier.as_ref()) {
        tracing::warn!(error = %e, "Audio unlock failed, alerts will be silent");
    }

    if let Some(push) = &config.push {
        let subscription = PushSubscription {
            endpoint: push.endpoint.clone(),
            keys: SubscriptionKeys {
                p256dh: push.p256dh.clone(),
                auth: push.auth.clone(),
            },
        };
        match wardcall_alerts::push::negotiate(&client, config.nurse_id, &subscription).await {
            Ok(id) => tracing::info!(subscription_id = id, "Push subscription registered"),
            Err(e) => tracing::warn!(error = %e, "Push registration failed, polling continues"),
        }
    }

    let (toasts, mut toast_rx) = toast::channel();
    // The station has no rendering surface; toasts land in the log.
    let toast_task = tokio::spawn(async move {
        while let Some(toast) = toast_rx.recv().await {
            match &toast.title {
                Some(title) => tracing::info!(%title, body = %toast.body, "toast"),
                None => tracing::info!(body = %toast.body, "toast"),
            }
        }
    });

    let dispatcher = Arc::new(AlertDispatcher::new(Arc::clone(&notifier), toasts));
    let source = NurseCalls::new(client, config.nurse_id);
    let observer =
        CallObserver::new(source, dispatcher).with_interval(config.poll_interval);

    let cancel = CancellationToken::new();
    let observer_task = tokio::spawn(observer.run(cancel.clone()));

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("Shutdown signal received, stopping");
    cancel.cancel();

    if let Err(e) = observer_task.await {
        tracing::error!(error = %e, "Call observer task panicked");
    }
    toast_task.abort();
}
