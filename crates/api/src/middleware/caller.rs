//! Caller identification.
//!
//! Authentication itself is out of scope: an upstream gateway verifies the
//! caller's token and forwards the owner id in the `x-owner-id` header. The
//! extractor only refuses requests that arrive without a usable id.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use munim_shared::types::OwnerId;

use crate::error::ApiError;

/// Header carrying the authenticated owner id.
pub const OWNER_HEADER: &str = "x-owner-id";

/// The authenticated caller, extracted from the gateway header.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub OwnerId);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(OWNER_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Not Authorized"))?;
        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Not Authorized"))?;
        let owner = value
            .parse::<OwnerId>()
            .map_err(|_| ApiError::unauthorized("Not Authorized"))?;
        Ok(Self(owner))
    }
}
