use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    clients::{
        database::{PostgresProfileStore, ProfileStore},
        fcm::{FcmClient, PushSender},
        health::HealthChecker,
    },
    config::Config,
    models::{
        event::{LikeEvent, MatchEvent},
        health::HealthStatus,
        response::{ApiError, DispatchResponse},
    },
    utils,
};

pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub push: Arc<dyn PushSender>,
    pub health_checker: HealthChecker,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhooks/like", post(like_webhook))
        .route("/webhooks/match", post(match_webhook))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let profiles = PostgresProfileStore::connect(&config.database_url).await?;

    let state = Arc::new(AppState {
        profiles: Arc::new(profiles),
        push: Arc::new(FcmClient::new(&config)),
        health_checker: HealthChecker::new(config.clone()),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Webhook server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn like_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();

    // Dislikes and malformed rows are a no-op success, not a failure.
    let Some(event) = LikeEvent::from_payload(&payload) else {
        info!(trace_id, "Not a like or invalid payload, skipping");
        return Ok(Json(DispatchResponse::ok()));
    };

    utils::process_like_event(&event, state.profiles.as_ref(), state.push.as_ref(), &trace_id)
        .await
        .map_err(|e| {
            error!(trace_id, error = %e, "Like dispatch failed");
            ApiError::from(e)
        })?;

    Ok(Json(DispatchResponse::ok()))
}

async fn match_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();

    let event = MatchEvent::from_payload(&payload)
        .ok_or_else(|| ApiError::bad_request("Invalid payload"))?;

    utils::process_match_event(&event, state.profiles.as_ref(), state.push.as_ref(), &trace_id)
        .await
        .map_err(|e| {
            error!(trace_id, error = %e, "Match dispatch failed");
            ApiError::from(e)
        })?;

    Ok(Json(DispatchResponse::ok()))
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}
