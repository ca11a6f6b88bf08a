pub mod catalog;
pub mod ui;

pub use catalog::catalog_routes;
pub use ui::ui_routes;

use crate::frontend;
use crate::services::CatalogClient;
use crate::ui::Orchestrator;
use axum::{routing::get, Router};
use std::sync::Arc;

pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub orchestrator: Orchestrator,
}

/// All routes, static assets last
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(catalog_routes())
        .nest("/ui", ui_routes())
        .with_state(state)
        .fallback(get(frontend::serve_frontend))
}
