use super::TrackFeatures;
use serde::{Deserialize, Serialize};

/// Fixed emotion enumeration; the discriminant is the prediction label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Sad = 0,
    Happy = 1,
    Energetic = 2,
    Calm = 3,
}

impl Emotion {
    /// Ordering shared with the probability vector
    pub const ALL: [Emotion; 4] = [Emotion::Sad, Emotion::Happy, Emotion::Energetic, Emotion::Calm];

    pub fn from_label(label: i64) -> Option<Self> {
        usize::try_from(label)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Sad => "Sad",
            Emotion::Happy => "Happy",
            Emotion::Energetic => "Energetic",
            Emotion::Calm => "Calm",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Happy => "happy",
            Emotion::Energetic => "energetic",
            Emotion::Calm => "calm",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a> {
    pub features: &'a TrackFeatures,
    pub track_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub label: i64,
    pub probabilities: Vec<f64>,
    #[serde(default)]
    pub preview_available: bool,
}

impl PredictionResult {
    pub fn emotion(&self) -> Option<Emotion> {
        Emotion::from_label(self.label)
    }

    /// Probability for an emotion, zero when the service sent a short vector
    pub fn probability(&self, emotion: Emotion) -> f64 {
        self.probabilities
            .get(emotion as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Body returned by the prediction service alongside a non-success status
#[derive(Debug, Deserialize)]
pub struct PredictionErrorBody {
    pub error: String,
}
