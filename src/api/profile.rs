use super::auth::Caller;
use crate::domain::profile::UserProfile;
use crate::dto::profile::{AvatarUploaded, ProfileView, UpdateProfile};
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, ValidationErrorResponse, extract_file_upload,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(get_profile, update_profile, upload_avatar))]
pub struct ProfileApi;

/// Builds a router for the caller's display profile routes. Profile metadata
/// lives with the identity provider rather than our own database, so these
/// handlers receive the provider-backed adapters from config.
pub fn profile_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState, caller: Caller| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let profile_service = domain::profile::ProfileService {};
                let profile_store =
                    persistence::auth_profile_store::AuthProfileStore::new(&app_state.config);

                get_profile(caller, &mut ext_cxn, &profile_service, &profile_store).await
            }),
        )
        .route(
            "/",
            put(
                |State(app_state): AppState,
                 caller: Caller,
                 Json(update): Json<dto::profile::UpdateProfile>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let profile_service = domain::profile::ProfileService {};
                    let profile_store =
                        persistence::auth_profile_store::AuthProfileStore::new(&app_state.config);

                    update_profile(caller, update, &mut ext_cxn, &profile_service, &profile_store)
                        .await
                },
            ),
        )
        .route(
            "/avatar",
            post(
                |State(app_state): AppState, caller: Caller, multipart: Multipart| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let profile_service = domain::profile::ProfileService {};
                    let avatar_store =
                        persistence::blob_object_store::BlobObjectStore::new(&app_state.config);
                    let upload = extract_file_upload(multipart).await?;

                    upload_avatar(caller, upload, &mut ext_cxn, &profile_service, &avatar_store)
                        .await
                },
            ),
        )
}

/// Retrieves the caller's display profile. Users who never saved one get an
/// empty profile rather than a 404.
#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileView),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn get_profile(
    caller: Caller,
    ext_cxn: &mut impl ExternalConnectivity,
    profile_service: &impl domain::profile::driving_ports::ProfilePort,
    profile_store: &impl domain::profile::driven_ports::ProfileStore,
) -> Result<Json<dto::profile::ProfileView>, ErrorResponse> {
    info!("Fetching the profile of user {}", caller.user_id);

    let profile = profile_service
        .profile_for_user(caller.user_id, &mut *ext_cxn, profile_store)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::profile::ProfileView::from(profile)))
}

/// Replaces the caller's display profile
#[utoipa::path(
    put,
    path = "/profile",
    tag = "profile",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid profile data", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn update_profile(
    caller: Caller,
    update: dto::profile::UpdateProfile,
    ext_cxn: &mut impl ExternalConnectivity,
    profile_service: &impl domain::profile::driving_ports::ProfilePort,
    profile_store: &impl domain::profile::driven_ports::ProfileStore,
) -> Result<StatusCode, ErrorResponse> {
    info!("Updating the profile of user {}", caller.user_id);
    update.validate().map_err(ValidationErrorResponse::from)?;

    let profile = UserProfile::from(update);
    profile_service
        .update_profile(caller.user_id, &profile, &mut *ext_cxn, profile_store)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(StatusCode::OK)
}

/// Uploads a new avatar image for the caller, returning its public URL. The
/// caller is expected to follow up with a profile update referencing the URL.
#[utoipa::path(
    post,
    path = "/profile/avatar",
    tag = "profile",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarUploaded),
        (status = 400, description = "Unreadable upload", body = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
async fn upload_avatar(
    caller: Caller,
    upload: domain::FileUpload,
    ext_cxn: &mut impl ExternalConnectivity,
    profile_service: &impl domain::profile::driving_ports::ProfilePort,
    avatar_store: &impl domain::profile::driven_ports::AvatarStore,
) -> Result<Json<dto::profile::AvatarUploaded>, ErrorResponse> {
    info!(
        "Storing avatar {} for user {}",
        upload.file_name, caller.user_id
    );

    let avatar_url = profile_service
        .upload_avatar(caller.user_id, &upload, &mut *ext_cxn, avatar_store)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::profile::AvatarUploaded { avatar_url }))
}
