use crate::error::AppError;
use crate::models::FtvQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use ftv::CONTENT_TYPE;

pub async fn get_payload(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Resolve defaults and reject malformed shapes before touching the cache
    let shape = FtvQuery::from_pairs(pairs).into_shape(&state.defaults)?;
    shape.validate(&state.limits)?;

    // 2. Misses are CPU-bound; keep them off the async workers
    let cache = state.cache.clone();
    let payload = tokio::task::spawn_blocking(move || cache.get_or_encode(&shape))
        .await
        .map_err(|e| AppError::InternalError(e.into()))?;

    tracing::info!(
        num_series = shape.num_series,
        num_points = shape.num_points,
        percent_missing = shape.percent_missing,
        "About to return {} bytes.",
        payload.len()
    );

    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], payload))
}
