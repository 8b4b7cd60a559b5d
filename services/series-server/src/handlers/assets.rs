use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

const HTML: &str = "text/html";
const JAVASCRIPT: &str = "text/javascript";

pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_file(&state, "examples/remote_graphs.html", HTML).await
}

pub async fn ftv_js(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_file(&state, "src/ftv.js", JAVASCRIPT).await
}

pub async fn timeseries_js(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_file(&state, "src/timeseries.js", JAVASCRIPT).await
}

pub async fn wire_format_js(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_file(&state, "src/wire_format.js", JAVASCRIPT).await
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html("Try \"/\" instead.")).into_response()
}

async fn serve_file(
    state: &AppState,
    relative: &str,
    content_type: &'static str,
) -> Result<Response, AppError> {
    let path = state.asset_root.join(relative);
    match tokio::fs::read(&path).await {
        Ok(contents) => Ok(([(header::CONTENT_TYPE, content_type)], contents).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Asset missing: {}", path.display());
            Err(AppError::NotFound(relative.to_string()))
        }
        Err(e) => Err(AppError::InternalError(anyhow::Error::new(e).context(format!(
            "reading asset {}",
            path.display()
        )))),
    }
}
