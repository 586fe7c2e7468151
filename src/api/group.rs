use super::auth::Caller;
use crate::domain::group::driving_ports::GroupError;
use crate::dto::group::{GroupView, InsertedGroup, NewGroup};
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, NotFoundErrorResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_groups, create_group, delete_group))]
pub struct GroupsApi;

/// Builds a router for the caller's task group routes
pub fn group_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState, caller: Caller| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let group_service = domain::group::GroupService {};

                list_groups(caller, &mut ext_cxn, &group_service).await
            }),
        )
        .route(
            "/",
            post(
                |State(app_state): AppState,
                 caller: Caller,
                 Json(new_group): Json<dto::group::NewGroup>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let group_service = domain::group::GroupService {};

                    create_group(caller, new_group, &mut ext_cxn, &group_service).await
                },
            ),
        )
        .route(
            "/:group_id",
            delete(
                |State(app_state): AppState, caller: Caller, Path(group_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let group_service = domain::group::GroupService {};

                    delete_group(caller, group_id, &mut ext_cxn, &group_service).await
                },
            ),
        )
}

/// Retrieves every group the caller owns
#[utoipa::path(
    get,
    path = "/groups",
    tag = "groups",
    responses(
        (status = 200, description = "The caller's task groups", body = Vec<GroupView>),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn list_groups(
    caller: Caller,
    ext_cxn: &mut impl ExternalConnectivity,
    group_service: &impl domain::group::driving_ports::GroupPort,
) -> Result<Json<Vec<dto::group::GroupView>>, ErrorResponse> {
    info!("Fetching task groups for user {}", caller.user_id);
    let group_read = persistence::db_group_driven_ports::DbGroupReader {};

    let groups = group_service
        .groups_for_user(caller.user_id, &mut *ext_cxn, &group_read)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(
        groups.into_iter().map(dto::group::GroupView::from).collect(),
    ))
}

/// Creates a new task group owned by the caller
#[utoipa::path(
    post,
    path = "/groups",
    tag = "groups",
    request_body = NewGroup,
    responses(
        (status = 201, description = "Group created", body = InsertedGroup),
        (status = 400, description = "Invalid group data", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn create_group(
    caller: Caller,
    new_group: dto::group::NewGroup,
    ext_cxn: &mut impl ExternalConnectivity,
    group_service: &impl domain::group::driving_ports::GroupPort,
) -> Result<(StatusCode, Json<dto::group::InsertedGroup>), ErrorResponse> {
    info!("Creating a task group for user {}", caller.user_id);
    new_group.validate().map_err(ValidationErrorResponse::from)?;

    let domain_new_group = domain::group::NewGroup::from(new_group);
    let group_write = persistence::db_group_driven_ports::DbGroupWriter {};

    let created_id = group_service
        .create_group(caller.user_id, &domain_new_group, &mut *ext_cxn, &group_write)
        .await
        .map_err(GenericErrorResponse)?;

    Ok((
        StatusCode::CREATED,
        Json(dto::group::InsertedGroup { id: created_id }),
    ))
}

/// Soft-deletes one of the caller's task groups. Tasks keep their group
/// reference; only the group itself vanishes from listings.
#[utoipa::path(
    delete,
    path = "/groups/{group_id}",
    tag = "groups",
    params(
        ("group_id" = i32, Path, description = "ID of the group to delete"),
    ),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn delete_group(
    caller: Caller,
    group_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    group_service: &impl domain::group::driving_ports::GroupPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting task group {group_id} for user {}", caller.user_id);
    let group_read = persistence::db_group_driven_ports::DbGroupReader {};
    let group_write = persistence::db_group_driven_ports::DbGroupWriter {};

    let delete_result = group_service
        .delete_group(
            caller.user_id,
            group_id,
            Utc::now(),
            &mut *ext_cxn,
            &group_read,
            &group_write,
        )
        .await;
    match delete_result {
        Ok(()) => Ok(StatusCode::OK),
        Err(GroupError::NotFound) => Err(NotFoundErrorResponse.into()),
        Err(GroupError::PortError(cause)) => Err(GenericErrorResponse(cause).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::deserialize_body;
    use crate::domain::group::TaskGroup;
    use crate::domain::group::test_util::MockGroupService;
    use crate::external_connections;
    use axum::response::IntoResponse;
    use speculoos::prelude::*;
    use uuid::Uuid;

    fn test_caller() -> Caller {
        Caller {
            user_id: Uuid::new_v4(),
            email: "person@example.com".to_owned(),
        }
    }

    mod list_groups {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let caller = test_caller();
            let mut group_service_raw = MockGroupService::new();
            group_service_raw.groups_for_user_result.set_returned_anyhow(Ok(vec![TaskGroup {
                id: 4,
                owner_user_id: caller.user_id,
                name: "Fitness".to_owned(),
            }]));
            let group_service = std::sync::Mutex::new(group_service_raw);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let response = list_groups(caller, &mut ext_cxn, &group_service).await;
            let Ok(Json(groups)) = response else {
                panic!("expected a successful group listing");
            };
            assert_eq!(
                vec![GroupView {
                    id: 4,
                    name: "Fitness".to_owned(),
                }],
                groups
            );
        }
    }

    mod create_group {
        use super::*;

        #[tokio::test]
        async fn happy_path_returns_201_with_the_new_id() {
            let caller = test_caller();
            let expected_user = caller.user_id;
            let mut group_service_raw = MockGroupService::new();
            group_service_raw.create_group_result.set_returned_anyhow(Ok(7));
            let group_service = std::sync::Mutex::new(group_service_raw);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let response = create_group(
                caller,
                dto::group::NewGroup {
                    name: "Chores".to_owned(),
                },
                &mut ext_cxn,
                &group_service,
            )
            .await;
            let Ok((status, Json(inserted))) = response else {
                panic!("expected a successful creation response");
            };
            assert_eq!(StatusCode::CREATED, status);
            assert_eq!(7, inserted.id);

            let locked_service = group_service.lock().expect("group service mutex poisoned");
            assert!(matches!(
                locked_service.create_group_result.calls(),
                [(user, new_group)] if *user == expected_user && new_group.name == "Chores"
            ));
        }

        #[tokio::test]
        async fn returns_400_on_empty_name() {
            let group_service = MockGroupService::new_locked();
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let response = create_group(
                test_caller(),
                dto::group::NewGroup {
                    name: String::new(),
                },
                &mut ext_cxn,
                &group_service,
            )
            .await
            .into_response();
            assert_eq!(StatusCode::BAD_REQUEST, response.status());

            let body: BasicErrorResponse = deserialize_body(response.into_body()).await;
            assert_eq!("invalid_input", body.error_code);
        }
    }

    mod delete_group {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let mut group_service_raw = MockGroupService::new();
            group_service_raw.delete_group_result.set_returned_result(Ok(()));
            let group_service = std::sync::Mutex::new(group_service_raw);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let response = delete_group(test_caller(), 3, &mut ext_cxn, &group_service).await;
            assert_that!(response).is_ok_containing(StatusCode::OK);
        }

        #[tokio::test]
        async fn foreign_group_returns_404() {
            let mut group_service_raw = MockGroupService::new();
            group_service_raw
                .delete_group_result
                .set_returned_result(Err(GroupError::NotFound));
            let group_service = std::sync::Mutex::new(group_service_raw);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let response = delete_group(test_caller(), 3, &mut ext_cxn, &group_service)
                .await
                .into_response();
            assert_eq!(StatusCode::NOT_FOUND, response.status());

            let body: BasicErrorResponse = deserialize_body(response.into_body()).await;
            assert_eq!("not_found", body.error_code);
        }
    }
}
