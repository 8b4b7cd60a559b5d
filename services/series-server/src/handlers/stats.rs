use crate::models::StatsResponse;
use crate::state::AppState;
use axum::{Json, extract::State};

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}
