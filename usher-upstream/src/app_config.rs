use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub seatsio: SeatsioConfig,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Credentials and endpoint for the seats.io reservation API.
///
/// `secret_key` and `event_key` are not validated at load time; a missing
/// value surfaces downstream as a rejected upstream call.
#[derive(Debug, Deserialize, Clone)]
pub struct SeatsioConfig {
    pub secret_key: String,
    pub event_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.seats.io".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub shared_secret: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of USHER)
            // Eg.. `USHER__WEBHOOK__SHARED_SECRET=...` would set the webhook secret
            .add_source(config::Environment::with_prefix("USHER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
