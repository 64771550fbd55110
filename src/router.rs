use crate::error::AppError;
use axum::{
    extract::State,
    http::header,
    response::{
        IntoResponse,
        Response,
    },
    routing::get,
    Router,
};
use freeradius_exporter_config::HEALTH_PATH;
use prometheus::{
    Encoder as _,
    Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
}

pub fn create_router(metrics_path: &str, registry: Registry) -> Router {
    let state = AppState { registry };

    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(metrics_path, get(metrics))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "OK"
}

/// Every request runs a full scrape. radmin blocks, so gathering happens off the runtime threads.
async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = tokio::task::spawn_blocking(move || encode(&state.registry))
        .await
        .map_err(|err| AppError::Gather(eyre::Report::new(err)))?
        .map_err(AppError::Gather)?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response())
}

/// Gathers `registry` and renders it in the Prometheus text exposition format.
pub fn encode(registry: &Registry) -> eyre::Result<String> {
    let families = registry.gather();
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
