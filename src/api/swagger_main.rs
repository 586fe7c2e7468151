use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "ProveIt API",
    description = "An accountability todo API: stake money on your tasks, prove you did them"
))]
struct ProveItApi;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from other locations in the app, such as the [dto] package
/// and submodules of [api][crate::api]
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = ProveItApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::task::TasksApi::openapi());
    api_docs.merge(super::group::GroupsApi::openapi());
    api_docs.merge(super::review::ReviewApi::openapi());
    api_docs.merge(super::profile::ProfileApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
