use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AudioPreview, PredictionErrorBody, PredictionRequest, PredictionResult, TrackFeatures};
use reqwest::{header::CONTENT_TYPE, Client};

/// Client for the external emotion prediction service
#[derive(Debug, Clone)]
pub struct PredictionClient {
    base_url: String,
    client: Client,
}

impl PredictionClient {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            base_url: config.prediction_url.clone(),
            client,
        }
    }

    pub async fn predict(&self, features: &TrackFeatures, track_id: &str) -> Result<PredictionResult> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictionRequest { features, track_id };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            // The service explains rejections in an `{error}` body
            return match serde_json::from_str::<PredictionErrorBody>(&text) {
                Ok(body) => {
                    tracing::warn!("Prediction rejected ({}): {}", status, body.error);
                    Err(AppError::Prediction(body.error))
                }
                Err(_) => Err(AppError::Upstream {
                    status: status.as_u16(),
                    message: format!("Prediction service error: {}", text),
                }),
            };
        }

        response.json().await.map_err(|e| AppError::Upstream {
            status: 200,
            message: format!("Failed to parse prediction: {}", e),
        })
    }

    pub async fn preview_audio(&self, track_id: &str) -> Result<AudioPreview> {
        let url = format!("{}/audio/{}", self.base_url, track_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: "Audio preview request failed".to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .unwrap_or("audio/wav")
            .to_string();
        let data = response.bytes().await?;

        tracing::debug!("Fetched {} bytes of preview audio for {}", data.len(), track_id);

        Ok(AudioPreview { content_type, data })
    }
}
