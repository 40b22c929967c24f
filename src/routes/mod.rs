//! Router assembly.

mod common;
mod inventory;

pub use common::common_routes;
pub use inventory::inventory_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full application: common and inventory routes behind a body-size limit and request tracing.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(inventory_routes(state))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
