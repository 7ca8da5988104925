use crate::infra::{AppState, DashboardContext};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use candidate_pipeline::error::AppError;
use candidate_pipeline::pipeline::board::ALL;
use candidate_pipeline::pipeline::{
    validate, Candidate, CandidateEdit, CandidateId, DashboardView, EvaluationStatus, JobFilter,
    Notification, Notifier, OutreachOutcome, StatusFilter,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::PoisonError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) job: Option<String>,
    #[serde(default)]
    pub(crate) refresh: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: EvaluationStatus,
}

pub(crate) fn with_dashboard_routes(context: DashboardContext) -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route(
            "/api/v1/candidates/:id",
            get(candidate_endpoint).put(update_candidate_endpoint),
        )
        .route("/api/v1/candidates/:id/status", put(update_status_endpoint))
        .route("/api/v1/candidates/:id/call", post(call_endpoint))
        .route("/api/v1/candidates/:id/schedule", post(schedule_endpoint))
        .route("/api/v1/notifications", get(notifications_endpoint))
        .with_state(context)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Projects the cached list through the filters. The backend is only hit when the board
/// is cold or the caller passes `refresh=true`.
pub(crate) async fn dashboard_endpoint(
    State(context): State<DashboardContext>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let status = query
        .status
        .as_deref()
        .unwrap_or(ALL)
        .parse::<StatusFilter>()?;
    let job = JobFilter::from(query.job.as_deref().unwrap_or(ALL));

    let cold = !context
        .board
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_loaded();
    let fetched = if query.refresh || cold {
        Some(context.store.list().await)
    } else {
        None
    };

    let mut board = context
        .board
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(candidates) = fetched {
        board.replace_list(candidates);
    }
    board.set_filters(status, job);
    Ok(Json(board.view()))
}

pub(crate) async fn candidate_endpoint(
    State(context): State<DashboardContext>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = context.store.get_by_id(&CandidateId(id)).await?;
    Ok(Json(candidate))
}

pub(crate) async fn update_candidate_endpoint(
    State(context): State<DashboardContext>,
    Path(id): Path<String>,
    Json(edit): Json<CandidateEdit>,
) -> Result<Json<Candidate>, AppError> {
    let id = CandidateId(id);
    let loaded = context.store.get_by_id(&id).await?;
    let edited = edit.apply_to(&loaded);

    if let Err(err) = validate(&edited) {
        let message = format!("Please fill in {}", err.missing.join(", "));
        context.notifications.notify(Notification::error(message));
        return Err(err.into());
    }

    let updated = context.store.update(&id, &edited).await?;
    remember(&context, &updated);
    Ok(Json(updated))
}

pub(crate) async fn update_status_endpoint(
    State(context): State<DashboardContext>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Candidate>, AppError> {
    let updated = context
        .store
        .update_status(&CandidateId(id), &request.status)
        .await?;
    remember(&context, &updated);
    Ok(Json(updated))
}

pub(crate) async fn call_endpoint(
    State(context): State<DashboardContext>,
    Path(id): Path<String>,
) -> Result<Json<OutreachOutcome>, AppError> {
    let candidate = resolve(&context, CandidateId(id)).await?;
    Ok(Json(context.initiator.initiate_call(&candidate).await))
}

pub(crate) async fn schedule_endpoint(
    State(context): State<DashboardContext>,
    Path(id): Path<String>,
) -> Result<Json<OutreachOutcome>, AppError> {
    let candidate = resolve(&context, CandidateId(id)).await?;
    Ok(Json(context.initiator.schedule_interview(&candidate).await))
}

pub(crate) async fn notifications_endpoint(
    State(context): State<DashboardContext>,
) -> Json<Vec<Notification>> {
    Json(context.notifications.drain())
}

/// Prefer the cached row; fall back to the backend when the board has not seen the id.
async fn resolve(context: &DashboardContext, id: CandidateId) -> Result<Candidate, AppError> {
    let cached = context
        .board
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .find(&id)
        .cloned();

    match cached {
        Some(candidate) => Ok(candidate),
        None => Ok(context.store.get_by_id(&id).await?),
    }
}

fn remember(context: &DashboardContext, updated: &Candidate) {
    context
        .board
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .apply_update(updated.clone());
}
