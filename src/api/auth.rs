//! Authenticated-user extraction.
//!
//! Identity is established upstream (session/JWT termination happens at the
//! identity provider); by the time a request reaches this service the
//! authenticated user id arrives in the `x-user-id` header. The extractor
//! trusts that value unconditionally and uses it as the ownership key for
//! every record operation - nothing in the core re-validates identity.

use crate::errors::Error;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user id attached to the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(Error::Unauthenticated)?;

        Ok(Self(user_id.to_string()))
    }
}
