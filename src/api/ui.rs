use crate::api::AppState;
use crate::error::Result;
use crate::services::catalog::validate_track_id;
use crate::ui::{render, InputAction};
use axum::{
    extract::{Path, Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html,
    },
    routing::get,
    Router,
};
use futures::{stream::Stream, StreamExt};
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc};

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    q: String,
}

pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/suggestions", get(suggestions))
        .route("/analysis/:id", get(analysis))
}

/// Suggestion list markup for one input event. Short queries render an empty
/// list without touching the catalog.
async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionParams>,
) -> Result<Html<String>> {
    let html = match InputAction::from_input(&params.q) {
        InputAction::Clear => String::new(),
        InputAction::Search(query) => {
            let tracks = state
                .catalog
                .search_tracks(&query)
                .await
                .map_err(|e| e.proxied("Error fetching tracks"))?;
            render::render_suggestions(&tracks)
        }
    };

    Ok(Html(html))
}

/// SSE endpoint streaming one client's feature/prediction run as rendered
/// fragments. Runs from different clients proceed independently.
async fn analysis(
    State(state): State<Arc<AppState>>,
    Path(track_id): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    validate_track_id(&track_id)?;

    // The run is owned by the response stream; a disconnect drops and aborts it
    let stream = state.orchestrator.start(track_id).map(|event| {
        let sse = match render::render_event(&event) {
            Some(html) => Event::default().event("fragment").data(html),
            None => Event::default().event("done").data(""),
        };
        Ok(sse)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
