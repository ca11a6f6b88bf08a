use super::{PredictionResult, TrackFeatures};
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioPreview {
    pub content_type: String,
    pub data: Bytes,
}

/// Progress of one feature/prediction run, in the order it is emitted
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Processing,
    Features(TrackFeatures),
    Prediction(PredictionResult),
    /// The prediction service answered with a structured error
    PredictionRejected { message: String },
    AudioLoading,
    AudioReady(AudioPreview),
    AudioFailed { message: String },
    Failed { message: String },
    Done,
}
