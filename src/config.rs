use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_client_id: String,
    pub catalog_client_secret: String,
    /// Host serving the client-credentials token endpoint
    pub catalog_accounts_url: String,
    pub catalog_api_url: String,
    pub prediction_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Applied to every outbound request
    pub request_timeout: Duration,
    /// Allowed CORS origins (comma-separated). Use "*" for any origin (development only).
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Catalog credentials are required - never proceed with empty ones
        let required = |key: &str| -> Result<String, anyhow::Error> {
            var(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} environment variable must be set", key))
        };
        let url = |key: &str, default: &str| {
            var(key)
                .unwrap_or_else(|| default.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let catalog_client_id = required("CATALOG_CLIENT_ID")?;
        let catalog_client_secret = required("CATALOG_CLIENT_SECRET")?;

        let server_port = match var("SERVER_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("SERVER_PORT is not a valid port: {}", e))?,
            None => 3000,
        };

        let timeout_secs: u64 = match var("REQUEST_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("REQUEST_TIMEOUT_SECS is not a number: {}", e))?,
            None => 10,
        };
        if timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be greater than zero"));
        }

        // Parse CORS origins - default to the local page origins
        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            catalog_client_id,
            catalog_client_secret,
            catalog_accounts_url: url("CATALOG_ACCOUNTS_URL", "https://accounts.spotify.com"),
            catalog_api_url: url("CATALOG_API_URL", "https://api.spotify.com"),
            prediction_url: url("PREDICTION_URL", "http://127.0.0.1:5000"),
            server_host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}
