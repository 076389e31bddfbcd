//! Station configuration from environment variables.

use std::time::Duration;

use wardcall_core::types::DbId;

/// Default seconds between call polls.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Configuration error: the station refuses to start without a
/// complete, valid environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{0} must be a valid integer")]
    Invalid(&'static str),
}

/// Push-channel material, present only when the deployment wires the
/// optional out-of-band channel.
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// Runtime configuration for one nurse station.
#[derive(Debug, Clone)]
pub struct StationConfig {
    /// Backend base URL, e.g. `http://host:8080/api`.
    pub api_url: String,
    /// Nurse (or backing user) id the station polls for.
    pub nurse_id: DbId,
    /// Bearer token of the nurse session, if the deployment uses one.
    pub auth_token: Option<String>,
    /// Interval between call polls.
    pub poll_interval: Duration,
    /// Optional push channel registration material.
    pub push: Option<PushConfig>,
}

impl StationConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Required | Default | Description                       |
    /// |----------------------|----------|---------|-----------------------------------|
    /// | `BACKEND_API_URL`    | yes      | --      | REST base URL                     |
    /// | `NURSE_ID`           | yes      | --      | Nurse id to poll calls for        |
    /// | `AUTH_TOKEN`         | no       | --      | Bearer token for the session      |
    /// | `POLL_INTERVAL_SECS` | no       | `3`     | Seconds between call polls        |
    /// | `PUSH_ENDPOINT`      | no       | --      | Push delivery endpoint            |
    /// | `PUSH_P256DH`        | no       | --      | Push encryption key               |
    /// | `PUSH_AUTH`          | no       | --      | Push auth secret                  |
    ///
    /// The push channel activates only when all three `PUSH_*`
    /// variables are present; anything less leaves it off, which is
    /// a normal deployment, not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url =
            std::env::var("BACKEND_API_URL").map_err(|_| ConfigError::Missing("BACKEND_API_URL"))?;

        let nurse_id: DbId = std::env::var("NURSE_ID")
            .map_err(|_| ConfigError::Missing("NURSE_ID"))?
            .parse()
            .map_err(|_| ConfigError::Invalid("NURSE_ID"))?;

        let auth_token = std::env::var("AUTH_TOKEN").ok();

        let poll_interval_secs: u64 = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("POLL_INTERVAL_SECS"))?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        let push = match (
            std::env::var("PUSH_ENDPOINT").ok(),
            std::env::var("PUSH_P256DH").ok(),
            std::env::var("PUSH_AUTH").ok(),
        ) {
            (Some(endpoint), Some(p256dh), Some(auth)) => Some(PushConfig {
                endpoint,
                p256dh,
                auth,
            }),
            _ => None,
        };

        Ok(Self {
            api_url,
            nurse_id,
            auth_token,
            poll_interval: Duration::from_secs(poll_interval_secs),
            push,
        })
    }
}
