use crate::SharedData;
use crate::routing_utils::{BasicErrorResponse, Json};
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

/// Header carrying the authenticated user's ID, populated by the gateway in
/// front of this service after it validates the caller's token
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's email address
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The authenticated identity behind a request. Extraction fails with a 401
/// when the gateway headers are missing or unreadable.
pub struct Caller {
    pub user_id: Uuid,
    pub email: String,
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(BasicErrorResponse {
            error_code: "unauthenticated".into(),
            error_description: "The request did not carry a valid authenticated identity.".into(),
            extra_info: None,
        }),
    )
        .into_response()
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(unauthenticated)?;
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthenticated)?
            .to_owned();

        Ok(Caller { user_id, email })
    }
}

/// A [Caller] who may use the review panel. This extractor is the single place
/// reviewer access is decided: admin routes ask for an AdminCaller and
/// everything behind them can assume the check already happened.
pub struct AdminCaller(pub Caller);

#[axum::async_trait]
impl FromRequestParts<Arc<SharedData>> for AdminCaller {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<SharedData>,
    ) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, state).await?;
        if !caller.email.ends_with(&state.config.admin_email_domain) {
            return Err((
                StatusCode::FORBIDDEN,
                Json(BasicErrorResponse {
                    error_code: "forbidden".into(),
                    error_description: "You do not have access to the review panel.".into(),
                    extra_info: None,
                }),
            )
                .into_response());
        }

        Ok(AdminCaller(caller))
    }
}
