use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{TrackFeatures, TrackSummary};
use crate::services::TokenProvider;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::collections::HashSet;

/// Upper bound on suggestions returned for one query
pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    tokens: TokenProvider,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<CatalogTrack>,
}

#[derive(Debug, Deserialize)]
struct CatalogTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<CatalogArtist>,
    album: Option<CatalogAlbum>,
}

#[derive(Debug, Deserialize)]
struct CatalogArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CatalogAlbum {
    #[serde(default)]
    images: Vec<CatalogImage>,
}

#[derive(Debug, Deserialize)]
struct CatalogImage {
    url: String,
}

impl From<CatalogTrack> for TrackSummary {
    fn from(track: CatalogTrack) -> Self {
        TrackSummary {
            id: track.id,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album_image_url: track
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
        }
    }
}

/// Catalog ids are base-62 strings; anything else never reaches the upstream URL.
pub fn validate_track_id(track_id: &str) -> Result<()> {
    if track_id.is_empty() {
        return Err(AppError::Validation("Track id must not be empty".to_string()));
    }
    if !track_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!("Invalid track id: {}", track_id)));
    }
    Ok(())
}

impl CatalogClient {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            base_url: config.catalog_api_url.clone(),
            tokens: TokenProvider::new(config, client.clone()),
            client,
        }
    }

    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackSummary>> {
        // Whitespace is a legitimate query; only a missing one is refused
        if query.is_empty() {
            return Err(AppError::Validation("Search query must not be empty".to_string()));
        }

        let token = self.tokens.get_access_token().await?;
        let url = format!("{}/v1/search", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        tracing::debug!("Searching catalog: {} with query: {}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        let data: SearchResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upstream {
                status: 200,
                message: format!("Failed to parse search response: {}", e),
            })?;

        tracing::debug!("Found {} tracks in response", data.tracks.items.len());

        let mut seen = HashSet::new();
        Ok(data
            .tracks
            .items
            .into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .take(SEARCH_LIMIT)
            .map(TrackSummary::from)
            .collect())
    }

    pub async fn get_features(&self, track_id: &str) -> Result<TrackFeatures> {
        validate_track_id(track_id)?;

        let token = self.tokens.get_access_token().await?;
        let url = format!("{}/v1/audio-features/{}", self.base_url, track_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upstream {
                status: 200,
                message: format!("Failed to parse audio features: {}", e),
            })
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Catalog API error: {} - {}", status, body);
        Err(AppError::Upstream {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        })
    }
}
