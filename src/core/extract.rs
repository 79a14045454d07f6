use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::route_auth::AuthCtx;
use crate::prelude::*;

// Extractors //
//************//

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(ctx) = parts.extensions.get::<AuthCtx>().cloned() {
			Ok(Auth(ctx))
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// vim: ts=4
