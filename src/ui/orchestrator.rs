use crate::error::{AppError, Result};
use crate::models::{AnalysisEvent, AudioPreview, PredictionResult, TrackFeatures};
use crate::services::{CatalogClient, PredictionClient};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

#[async_trait]
pub trait FeatureSource: Send + Sync {
    async fn track_features(&self, track_id: &str) -> Result<TrackFeatures>;
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &TrackFeatures, track_id: &str) -> Result<PredictionResult>;

    async fn preview_audio(&self, track_id: &str) -> Result<AudioPreview>;
}

#[async_trait]
impl FeatureSource for CatalogClient {
    async fn track_features(&self, track_id: &str) -> Result<TrackFeatures> {
        self.get_features(track_id).await
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, features: &TrackFeatures, track_id: &str) -> Result<PredictionResult> {
        PredictionClient::predict(self, features, track_id).await
    }

    async fn preview_audio(&self, track_id: &str) -> Result<AudioPreview> {
        PredictionClient::preview_audio(self, track_id).await
    }
}

/// One client's analysis: the event stream plus the task producing it.
///
/// Dropping it (the client disconnected) aborts the task, so nothing keeps
/// calling upstream services for a page that is gone.
pub struct AnalysisRun {
    events: mpsc::Receiver<AnalysisEvent>,
    task: JoinHandle<()>,
}

impl Stream for AnalysisRun {
    type Item = AnalysisEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for AnalysisRun {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            tracing::debug!("Client went away, aborting analysis");
            self.task.abort();
        }
    }
}

/// The receiver went away, so the rest of the run is pointless
struct Abandoned;

/// Drives one confirmation: features, then prediction, then the optional
/// audio preview. Progress is reported through an mpsc channel so the caller
/// can render each stage as it lands. Runs are independent of each other.
#[derive(Clone)]
pub struct Orchestrator {
    features: Arc<dyn FeatureSource>,
    predictor: Arc<dyn Predictor>,
}

impl Orchestrator {
    pub fn new(features: Arc<dyn FeatureSource>, predictor: Arc<dyn Predictor>) -> Self {
        Self { features, predictor }
    }

    /// Spawn a run for `track_id` owned by the returned [`AnalysisRun`].
    pub fn start(&self, track_id: String) -> AnalysisRun {
        let (tx, events) = mpsc::channel(16);
        let orchestrator = self.clone();
        let task = tokio::spawn(async move { orchestrator.run(track_id, tx).await });
        AnalysisRun { events, task }
    }

    /// Run the whole sequence and finish with `Done`.
    pub async fn run(&self, track_id: String, events: mpsc::Sender<AnalysisEvent>) {
        let span = tracing::info_span!("analysis", run_id = %Uuid::new_v4(), track_id = %track_id);

        async move {
            tracing::info!("Analysis started");
            match self.steps(&track_id, &events).await {
                Ok(()) => tracing::info!("Analysis finished"),
                Err(Abandoned) => tracing::info!("Client went away, abandoning analysis"),
            }
            let _ = events.send(AnalysisEvent::Done).await;
        }
        .instrument(span)
        .await
    }

    async fn steps(
        &self,
        track_id: &str,
        events: &mpsc::Sender<AnalysisEvent>,
    ) -> std::result::Result<(), Abandoned> {
        emit(events, AnalysisEvent::Processing).await?;

        // Fetched once; the same value is rendered and sent for prediction
        let features = match self.features.track_features(track_id).await {
            Ok(features) => features,
            Err(e) => return emit(events, failure(&e)).await,
        };
        emit(events, AnalysisEvent::Features(features.clone())).await?;

        let prediction = match self.predictor.predict(&features, track_id).await {
            Ok(prediction) => prediction,
            Err(AppError::Prediction(message)) => {
                tracing::warn!(kind = "prediction", "Prediction rejected: {}", message);
                return emit(events, AnalysisEvent::PredictionRejected { message }).await;
            }
            Err(e) => return emit(events, failure(&e)).await,
        };
        let preview_available = prediction.preview_available;
        emit(events, AnalysisEvent::Prediction(prediction)).await?;

        if !preview_available {
            return Ok(());
        }

        emit(events, AnalysisEvent::AudioLoading).await?;
        match self.predictor.preview_audio(track_id).await {
            Ok(preview) => emit(events, AnalysisEvent::AudioReady(preview)).await,
            Err(e) => {
                tracing::warn!(kind = e.kind(), "Audio preview failed: {}", e);
                emit(events, AnalysisEvent::AudioFailed {
                    message: e.to_string(),
                })
                .await
            }
        }
    }
}

async fn emit(
    events: &mpsc::Sender<AnalysisEvent>,
    event: AnalysisEvent,
) -> std::result::Result<(), Abandoned> {
    events.send(event).await.map_err(|_| Abandoned)
}

fn failure(e: &AppError) -> AnalysisEvent {
    tracing::error!(kind = e.kind(), "Analysis failed: {}", e);
    AnalysisEvent::Failed {
        message: e.to_string(),
    }
}
