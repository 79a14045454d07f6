use axum::{response::IntoResponse, Json, http::StatusCode};

pub type AgmResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	ConfigError(String),
	ValidationError(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			_ => write!(f, "{:?}", self),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			Error::PermissionDenied => (
				StatusCode::FORBIDDEN,
				"You do not have sufficient permissions to access this page.",
			)
				.into_response(),
			Error::ValidationError(msg) => (
				StatusCode::BAD_REQUEST,
				Json(serde_json::json!({ "error": msg })),
			)
				.into_response(),
			Error::ConfigError(msg) => (
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(serde_json::json!({ "error": msg })),
			)
				.into_response(),
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// vim: ts=4
