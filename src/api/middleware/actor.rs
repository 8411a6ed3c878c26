//! Caller identity for the audit trail.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header naming the caller on whose behalf an operation runs.
pub const ACTOR_HEADER: &str = "x-actor";

/// Actor recorded when the header is missing, blank or not valid UTF-8.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// Actor taken from the `x-actor` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

impl Actor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(ANONYMOUS_ACTOR);
        Ok(Actor(actor.to_string()))
    }
}
