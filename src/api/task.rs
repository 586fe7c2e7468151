use super::auth::Caller;
use crate::domain::task::driving_ports::TaskError;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, NotFoundErrorResponse, ValidationErrorResponse,
    extract_file_upload,
};
use crate::dto::task::{EvidenceUploaded, InsertedTask, NewTask, TaskSummary, TaskView};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, patch, post};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(
    task_summary,
    create_task,
    get_task,
    mark_complete,
    submit_for_review,
    attach_evidence,
    delete_task,
))]
pub struct TasksApi;

/// Builds a router for every route a user takes against their own tasks
pub fn task_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState, caller: Caller| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let task_service = domain::task::TaskService {};

                task_summary(caller, &mut ext_cxn, &task_service).await
            }),
        )
        .route(
            "/",
            post(
                |State(app_state): AppState,
                 caller: Caller,
                 Json(new_task): Json<dto::task::NewTask>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    create_task(caller, new_task, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:task_id",
            get(
                |State(app_state): AppState, caller: Caller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    get_task(caller, task_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:task_id",
            delete(
                |State(app_state): AppState, caller: Caller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    delete_task(caller, task_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:task_id/complete",
            patch(
                |State(app_state): AppState, caller: Caller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    mark_complete(caller, task_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:task_id/review",
            post(
                |State(app_state): AppState, caller: Caller, Path(task_id): Path<Uuid>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    submit_for_review(caller, task_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:task_id/evidence",
            post(
                |State(app_state): AppState,
                 caller: Caller,
                 Path(task_id): Path<Uuid>,
                 multipart: Multipart| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};
                    // The blob store adapter needs the storage URL and key
                    // from config, so it gets built here instead of in the
                    // handler proper
                    let evidence_store =
                        persistence::blob_object_store::BlobObjectStore::new(&app_state.config);
                    let upload = extract_file_upload(multipart).await?;

                    attach_evidence(
                        caller,
                        task_id,
                        upload,
                        &mut ext_cxn,
                        &task_service,
                        &evidence_store,
                    )
                    .await
                },
            ),
        )
}

/// Maps task domain failures onto API error responses
fn task_error_to_response(err: TaskError) -> ErrorResponse {
    match err {
        TaskError::NotFound => NotFoundErrorResponse.into(),
        TaskError::EvidenceMissing => (
            StatusCode::CONFLICT,
            Json(BasicErrorResponse {
                error_code: "evidence_missing".into(),
                error_description: TaskError::EvidenceMissing.to_string(),
                extra_info: None,
            }),
        )
            .into(),
        TaskError::PortError(cause) => GenericErrorResponse(cause).into(),
    }
}

/// Retrieves the caller's tasks, partitioned into lifecycle buckets
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "The caller's visible tasks, bucketed by status", body = TaskSummary),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn task_summary(
    caller: Caller,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<Json<dto::task::TaskSummary>, ErrorResponse> {
    info!("Fetching the task summary for user {}", caller.user_id);
    let now = Utc::now();
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};

    let buckets = task_service
        .task_summary(caller.user_id, now, &mut *ext_cxn, &task_read)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::task::TaskSummary::derive(buckets, now)))
}

/// Creates a new task owned by the caller
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = InsertedTask),
        (status = 400, description = "Invalid task data", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn create_task(
    caller: Caller,
    new_task: dto::task::NewTask,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<(StatusCode, Json<dto::task::InsertedTask>), ErrorResponse> {
    info!("Creating a task for user {}", caller.user_id);
    new_task.validate().map_err(ValidationErrorResponse::from)?;

    let domain_new_task = domain::task::NewTask::from(new_task);
    let task_write = persistence::db_task_driven_ports::DbTaskWriter {};

    let created_id = task_service
        .create_task(caller.user_id, &domain_new_task, &mut *ext_cxn, &task_write)
        .await
        .map_err(GenericErrorResponse)?;

    Ok((
        StatusCode::CREATED,
        Json(dto::task::InsertedTask { id: created_id }),
    ))
}

/// Retrieves a single task owned by the caller
#[utoipa::path(
    get,
    path = "/tasks/{task_id}",
    tag = "tasks",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task to fetch"),
    ),
    responses(
        (status = 200, description = "The requested task", body = TaskView),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn get_task(
    caller: Caller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<Json<dto::task::TaskView>, ErrorResponse> {
    info!("Fetching task {task_id} for user {}", caller.user_id);
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};

    let task = task_service
        .user_task_by_id(caller.user_id, task_id, &mut *ext_cxn, &task_read)
        .await
        .map_err(GenericErrorResponse)?
        .ok_or(NotFoundErrorResponse)?;

    Ok(Json(dto::task::TaskView::derive(task, Utc::now())))
}

/// Marks a task complete
#[utoipa::path(
    patch,
    path = "/tasks/{task_id}/complete",
    tag = "tasks",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task to mark complete"),
    ),
    responses(
        (status = 200, description = "Task marked complete"),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn mark_complete(
    caller: Caller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Marking task {task_id} complete for user {}", caller.user_id);
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};
    let task_write = persistence::db_task_driven_ports::DbTaskWriter {};

    task_service
        .mark_complete(caller.user_id, task_id, &mut *ext_cxn, &task_read, &task_write)
        .await
        .map_err(task_error_to_response)?;

    Ok(StatusCode::OK)
}

/// Queues a task's attached evidence for administrator review
#[utoipa::path(
    post,
    path = "/tasks/{task_id}/review",
    tag = "tasks",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task to submit"),
    ),
    responses(
        (status = 200, description = "Task queued for review"),
        (status = 404, response = BasicErrorResponse),
        (status = 409, description = "No evidence attached yet", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn submit_for_review(
    caller: Caller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<StatusCode, ErrorResponse> {
    info!(
        "Submitting task {task_id} for review on behalf of user {}",
        caller.user_id
    );
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};
    let task_write = persistence::db_task_driven_ports::DbTaskWriter {};

    task_service
        .submit_for_review(caller.user_id, task_id, &mut *ext_cxn, &task_read, &task_write)
        .await
        .map_err(task_error_to_response)?;

    Ok(StatusCode::OK)
}

/// Uploads an evidence file for a task and queues it for review
#[utoipa::path(
    post,
    path = "/tasks/{task_id}/evidence",
    tag = "tasks",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task the evidence belongs to"),
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Evidence stored", body = EvidenceUploaded),
        (status = 400, description = "Unreadable upload", body = BasicErrorResponse),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn attach_evidence(
    caller: Caller,
    task_id: Uuid,
    upload: domain::FileUpload,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
    evidence_store: &impl domain::task::driven_ports::EvidenceStore,
) -> Result<Json<dto::task::EvidenceUploaded>, ErrorResponse> {
    info!(
        "Attaching evidence {} to task {task_id} for user {}",
        upload.file_name, caller.user_id
    );
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};
    let task_write = persistence::db_task_driven_ports::DbTaskWriter {};

    let evidence_url = task_service
        .attach_evidence(
            caller.user_id,
            task_id,
            &upload,
            &mut *ext_cxn,
            &task_read,
            &task_write,
            evidence_store,
        )
        .await
        .map_err(task_error_to_response)?;

    Ok(Json(dto::task::EvidenceUploaded { evidence_url }))
}

/// Soft-deletes a task; it vanishes from listings but the row survives
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    tag = "tasks",
    params(
        ("task_id" = Uuid, Path, description = "ID of the task to delete"),
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn delete_task(
    caller: Caller,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting task {task_id} for user {}", caller.user_id);
    let task_read = persistence::db_task_driven_ports::DbTaskReader {};
    let task_write = persistence::db_task_driven_ports::DbTaskWriter {};

    task_service
        .delete_task(
            caller.user_id,
            task_id,
            Utc::now(),
            &mut *ext_cxn,
            &task_read,
            &task_write,
        )
        .await
        .map_err(task_error_to_response)?;

    Ok(StatusCode::OK)
}
