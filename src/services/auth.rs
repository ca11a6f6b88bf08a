use crate::config::Config;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Negotiates catalog bearer tokens with the client-credentials grant.
///
/// Tokens are not cached; every caller gets a freshly issued one.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    token_url: String,
    client_id: String,
    client_secret: String,
    client: Client,
}

impl TokenProvider {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            token_url: format!("{}/api/token", config.catalog_accounts_url),
            client_id: config.catalog_client_id.clone(),
            client_secret: config.catalog_client_secret.clone(),
            client,
        }
    }

    /// Any failure here surfaces as `AppError::Auth`, transport errors included.
    pub async fn get_access_token(&self) -> Result<String> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", AppError::from(e))))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Catalog token endpoint returned {}", status);
            return Err(AppError::Auth(format!("Token endpoint returned status {}", status)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Malformed token response: {}", e)))?;

        Ok(token.access_token)
    }
}
