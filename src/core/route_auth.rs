const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{response::Response, Request},
	middleware::Next,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time;

use crate::prelude::*;

/// Capability required to view or change the widget settings.
pub const CAP_MANAGE_OPTIONS: &str = "manage_options";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken<S> {
	pub sub: S,
	pub exp: u32,
	pub caps: Option<S>,
}

/// Authenticated caller: subject name plus granted capabilities.
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub sub: Box<str>,
	pub caps: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn can(&self, cap: &str) -> bool {
		self.caps.iter().any(|c| c.as_ref() == cap)
	}
}

pub fn generate_access_token(secret: &str, sub: &str, caps: &[&str]) -> AgmResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::PermissionDenied)?
		.as_secs() + 3600 * TOKEN_EXPIRE;

	let caps_joined = caps.join(",");
	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken::<&str> {
			sub,
			exp: expire as u32,
			caps: if caps.is_empty() { None } else { Some(&caps_joined) },
		},
		&jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|_| Error::PermissionDenied)?
	.into();

	Ok(token)
}

fn validate_token(secret: &str, token: &str) -> AgmResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data = decode::<AuthToken<Box<str>>>(
		token,
		&decoding_key,
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::PermissionDenied)?;

	Ok(AuthCtx {
		sub: token_data.claims.sub,
		caps: token_data
			.claims
			.caps
			.unwrap_or("".into())
			.split(',')
			.filter(|c| !c.is_empty())
			.map(Box::from)
			.collect(),
	})
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> AgmResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::PermissionDenied)?;

	if !auth_header.starts_with("Bearer ") {
		return Err(Error::PermissionDenied);
	}

	let token = &auth_header[7..];
	let ctx = validate_token(&app.opts.auth_secret, token)?;

	req.extensions_mut().insert(ctx);

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_roundtrip() {
		let token = generate_access_token("secret", "admin", &[CAP_MANAGE_OPTIONS]).unwrap();
		let ctx = validate_token("secret", &token).unwrap();
		assert_eq!(ctx.sub.as_ref(), "admin");
		assert!(ctx.can(CAP_MANAGE_OPTIONS));
		assert!(!ctx.can("other_cap"));
	}

	#[test]
	fn test_token_without_caps() {
		let token = generate_access_token("secret", "viewer", &[]).unwrap();
		let ctx = validate_token("secret", &token).unwrap();
		assert!(!ctx.can(CAP_MANAGE_OPTIONS));
	}

	#[test]
	fn test_token_wrong_secret_rejected() {
		let token = generate_access_token("secret", "admin", &[CAP_MANAGE_OPTIONS]).unwrap();
		assert!(validate_token("other", &token).is_err());
	}

	#[test]
	fn test_garbage_token_rejected() {
		assert!(validate_token("secret", "not-a-token").is_err());
	}
}

// vim: ts=4
