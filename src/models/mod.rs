pub mod analysis;
pub mod prediction;
pub mod search;
pub mod track;

pub use analysis::{AnalysisEvent, AudioPreview};
pub use prediction::{Emotion, PredictionErrorBody, PredictionRequest, PredictionResult};
pub use search::SearchParams;
pub use track::{TrackFeatures, TrackSummary};
