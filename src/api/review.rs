use super::auth::AdminCaller;
use crate::domain::review::Verdict;
use crate::domain::review::driving_ports::ReviewError;
use crate::dto::review::PendingTaskView;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, NotFoundErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;

#[derive(OpenApi)]
#[openapi(paths(pending_review, approve_task, reject_task))]
pub struct ReviewApi;

/// Builds a router for the administrator review panel. Every route demands an
/// [AdminCaller], so reviewer access is decided before any handler runs.
pub fn review_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState, admin: AdminCaller| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let review_service = domain::review::ReviewService {};

                pending_review(admin, &mut ext_cxn, &review_service).await
            }),
        )
        .route(
            "/:task_id/approve",
            post(
                |State(app_state): AppState, admin: AdminCaller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let review_service = domain::review::ReviewService {};

                    approve_task(admin, task_id, &mut ext_cxn, &review_service).await
                },
            ),
        )
        .route(
            "/:task_id/reject",
            post(
                |State(app_state): AppState, admin: AdminCaller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let review_service = domain::review::ReviewService {};

                    reject_task(admin, task_id, &mut ext_cxn, &review_service).await
                },
            ),
        )
}

/// Maps review domain failures onto API error responses
fn review_error_to_response(err: ReviewError) -> ErrorResponse {
    match err {
        ReviewError::TaskNotFound => NotFoundErrorResponse.into(),
        ReviewError::NotReviewable => (
            StatusCode::CONFLICT,
            Json(BasicErrorResponse {
                error_code: "not_reviewable".into(),
                error_description: ReviewError::NotReviewable.to_string(),
                extra_info: None,
            }),
        )
            .into(),
        ReviewError::AlreadyDecided => (
            StatusCode::CONFLICT,
            Json(BasicErrorResponse {
                error_code: "already_decided".into(),
                error_description: ReviewError::AlreadyDecided.to_string(),
                extra_info: None,
            }),
        )
            .into(),
        ReviewError::PortError(cause) => GenericErrorResponse(cause).into(),
    }
}

async fn record_verdict(
    admin: AdminCaller,
    task_id: Uuid,
    verdict: Verdict,
    ext_cxn: &mut impl ExternalConnectivity,
    review_service: &impl domain::review::driving_ports::ReviewPort,
) -> Result<StatusCode, ErrorResponse> {
    info!(
        "Reviewer {} recording verdict \"{verdict}\" on task {task_id}",
        admin.0.email
    );
    let queue = persistence::db_review_driven_ports::DbReviewQueue {};
    let verdict_write = persistence::db_review_driven_ports::DbVerdictWriter {};

    review_service
        .record_verdict(task_id, verdict, &mut *ext_cxn, &queue, &verdict_write)
        .await
        .map_err(review_error_to_response)?;

    Ok(StatusCode::OK)
}

/// Retrieves every task awaiting a verdict, across all users
#[utoipa::path(
    get,
    path = "/admin/review",
    tag = "review",
    responses(
        (status = 200, description = "Tasks awaiting a verdict", body = Vec<PendingTaskView>),
        (status = 401, response = BasicErrorResponse),
        (status = 403, description = "The caller is not a reviewer", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn pending_review(
    admin: AdminCaller,
    ext_cxn: &mut impl ExternalConnectivity,
    review_service: &impl domain::review::driving_ports::ReviewPort,
) -> Result<Json<Vec<dto::review::PendingTaskView>>, ErrorResponse> {
    info!("Reviewer {} fetching the pending queue", admin.0.email);
    let queue = persistence::db_review_driven_ports::DbReviewQueue {};

    let pending = review_service
        .pending_review(&mut *ext_cxn, &queue)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(
        pending
            .into_iter()
            .map(dto::review::PendingTaskView::from)
            .collect(),
    ))
}

/// Accepts a task's evidence, releasing the owner's stake
#[utoipa::path(
    post,
    path = "/admin/review/{task_id}/approve",
    tag = "review",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task under review"),
    ),
    responses(
        (status = 200, description = "Verdict recorded"),
        (status = 404, response = BasicErrorResponse),
        (status = 409, description = "Task is not reviewable or already received the opposite verdict", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn approve_task(
    admin: AdminCaller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    review_service: &impl domain::review::driving_ports::ReviewPort,
) -> Result<StatusCode, ErrorResponse> {
    record_verdict(admin, task_id, Verdict::Approved, ext_cxn, review_service).await
}

/// Declines a task's evidence, forfeiting the owner's stake
#[utoipa::path(
    post,
    path = "/admin/review/{task_id}/reject",
    tag = "review",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task under review"),
    ),
    responses(
        (status = 200, description = "Verdict recorded"),
        (status = 404, response = BasicErrorResponse),
        (status = 409, description = "Task is not reviewable or already received the opposite verdict", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn reject_task(
    admin: AdminCaller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    review_service: &impl domain::review::driving_ports::ReviewPort,
) -> Result<StatusCode, ErrorResponse> {
    record_verdict(admin, task_id, Verdict::Rejected, ext_cxn, review_service).await
}
