use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry in a search result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    #[serde(rename = "albumImageUrl")]
    pub album_image_url: Option<String>,
}

impl TrackSummary {
    /// Text shown in the suggestion list and copied into the search box on selection
    pub fn display_label(&self) -> String {
        format!("{} by {}", self.name, self.artists.join(", "))
    }
}

/// Acoustic attributes of a single track, as reported by the catalog.
///
/// Fields the catalog sends that are not listed here are kept in `extra` and
/// written back out unchanged, so the proxy response stays a passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFeatures {
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    pub tempo: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub loudness: f64,
    pub key: i64,
    pub mode: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
