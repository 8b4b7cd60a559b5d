use crate::handlers::{assets, payload, stats};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ftv", get(payload::get_payload))
        .route("/stats", get(stats::get_stats))
        .route("/", get(assets::index))
        .route("/ftv.js", get(assets::ftv_js))
        .route("/timeseries.js", get(assets::timeseries_js))
        .route("/wire_format.js", get(assets::wire_format_js))
        .fallback(assets::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
