pub mod auth;
pub mod catalog;
pub mod prediction;

pub use auth::TokenProvider;
pub use catalog::CatalogClient;
pub use prediction::PredictionClient;

use crate::config::Config;
use reqwest::Client;

/// Shared outbound HTTP client; every upstream call is bounded by the configured timeout
pub fn http_client(config: &Config) -> Result<Client, anyhow::Error> {
    Ok(Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!("track-emotion/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
