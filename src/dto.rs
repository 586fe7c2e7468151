pub mod group;
pub mod profile;
pub mod review;
pub mod task;

use crate::routing_utils;
use utoipa::OpenApi;

/// Gathers the OpenAPI schema definitions for the DTOs shared across the API
#[derive(OpenApi)]
#[openapi(components(
    schemas(
        task::NewTask,
        task::TaskView,
        task::TaskSummary,
        task::InsertedTask,
        task::EvidenceUploaded,
        group::NewGroup,
        group::GroupView,
        group::InsertedGroup,
        review::PendingTaskView,
        profile::ProfileView,
        profile::UpdateProfile,
        profile::AvatarUploaded,
        routing_utils::ExtraInfo,
        routing_utils::ValidationErrorSchema,
    ),
    responses(routing_utils::BasicErrorResponse)
))]
pub struct OpenApiSchemas;
