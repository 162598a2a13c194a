//! User identity extractor.
//!
//! Authentication is an upstream collaborator; requests arrive with the
//! resolved user identifier in a header. Handlers take [`CurrentUser`] to get
//! at it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use pantry_core::UserId;

/// Header carrying the pre-resolved user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the resolved user identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     format!("Hello, {user}!")
/// }
/// ```
pub struct CurrentUser(pub UserId);

/// Rejection when the identity header is missing or empty.
pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            format!("missing {USER_ID_HEADER} header"),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self(UserId::from(id)))
            .ok_or(MissingIdentity)
    }
}
