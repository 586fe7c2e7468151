use crate::domain::FileUpload;
use axum::extract::Multipart;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;
use serde::Serialize;
use tracing::error;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{ToResponse, ToSchema, openapi};
use validator::ValidationErrors;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToResponse)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[response(examples(
    ("Not Found" = (
        summary = "Entity could not be found (404)",
        value = json!({
            "error_code": "not_found",
            "error_description": "The requested entity could not be found.",
            "extra_info": null
        })
    )),

    ("Internal Failure" = (
        summary = "Something unexpected went wrong inside the server (500)",
        value = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )),

    ("Invalid Input" = (
        summary = "Invalid request body was passed (400)",
        value = json!({
            "error_code": "invalid_input",
            "error_description": "Submitted data was invalid.",
            "extra_info": {
                "description": [
                    {
                        "code": "length",
                        "message": null,
                        "params": { "value": "", "min": 1 }
                    }
                ]
            }
        })
    ))
))]
pub struct BasicErrorResponse {
    pub error_code: String,
    pub error_description: String,
    pub extra_info: Option<ExtraInfo>,
}

#[derive(Serialize, Debug, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Stand-in OpenAPI schema for [ValidationErrors] which just provides an empty object
#[derive(Serialize, Debug)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(transparent)]
pub struct ValidationErrorSchema(pub serde_json::Value);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

/// Response type that wraps validation errors and turns them into [BasicErrorResponse]s
pub struct ValidationErrorResponse(pub ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        let issue_detail = serde_json::to_value(&self.0).unwrap_or(serde_json::Value::Null);
        (
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse {
                error_code: "invalid_input".into(),
                error_description: "Submitted data was invalid.".to_owned(),
                extra_info: Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(
                    issue_detail,
                ))),
            }),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Response type for unexpected failures talking to external systems. Logs the
/// underlying cause and reports a generic 500 to the caller.
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(BasicErrorResponse {
                error_code: "internal_error".into(),
                error_description: "Could not access data to complete your request".into(),
                extra_info: None,
            }),
        )
            .into_response()
    }
}

/// Response type for lookups which came back empty
pub struct NotFoundErrorResponse;

impl IntoResponse for NotFoundErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(BasicErrorResponse {
                error_code: "not_found".into(),
                error_description: "The requested entity could not be found.".into(),
                extra_info: None,
            }),
        )
            .into_response()
    }
}

/// Pulls the first file field out of a multipart request body. Fields without
/// a file name are skipped.
pub async fn extract_file_upload(mut multipart: Multipart) -> Result<FileUpload, Response> {
    let bad_upload = |detail: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse {
                error_code: "invalid_upload".into(),
                error_description: "The uploaded file could not be read.".into(),
                extra_info: Some(ExtraInfo::Message(detail)),
            }),
        )
            .into_response()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| bad_upload(err.body_text()))?
    {
        let Some(file_name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| bad_upload(err.body_text()))?
            .to_vec();

        return Ok(FileUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(BasicErrorResponse {
            error_code: "missing_file".into(),
            error_description: "The request did not contain a file to upload.".into(),
            extra_info: None,
        }),
    )
        .into_response())
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            axum::Json(BasicErrorResponse {
                error_code: "invalid_json".into(),
                error_description:
                    "The passed request body contained malformed or unreadable JSON.".into(),
                extra_info: Some(ExtraInfo::Message(self.parse_problem)),
            }),
        )
            .into_response()
    }
}
