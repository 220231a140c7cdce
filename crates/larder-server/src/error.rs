// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.
//!
//! [`ServerError`] renders the HTML error page; [`ApiError`] wraps it for the
//! JSON endpoints. Both share one status mapping.

use axum::{
	extract::rejection::{FormRejection, JsonRejection, PathRejection},
	http::StatusCode,
	response::{Html, IntoResponse, Response},
	Json,
};
use larder_server_db::DbError;

use crate::views;

/// Errors a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Persistence failure, or a delete of an id that does not exist.
	#[error("Database error: {0}")]
	Db(#[from] DbError),

	/// Requested resource is absent.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Form body missing a required field or not form-encoded.
	#[error("Invalid form: {0}")]
	InvalidForm(#[from] FormRejection),

	/// Path segment failed to parse.
	#[error("Invalid path: {0}")]
	InvalidPath(#[from] PathRejection),

	/// JSON body failed to parse.
	#[error("Invalid JSON: {0}")]
	InvalidJson(#[from] JsonRejection),
}

impl ServerError {
	pub fn item_not_found() -> Self {
		ServerError::NotFound("Item not found".to_string())
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::Db(DbError::NotFound(_)) | ServerError::NotFound(_) => {
				StatusCode::NOT_FOUND
			}
			ServerError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ServerError::InvalidForm(rejection) => rejection.status(),
			ServerError::InvalidPath(rejection) => rejection.status(),
			ServerError::InvalidJson(rejection) => rejection.status(),
		}
	}

	/// Message shown to the client. Storage details stay in the logs.
	pub fn public_message(&self) -> String {
		match self {
			ServerError::Db(DbError::NotFound(_)) => "Item not found".to_string(),
			ServerError::Db(_) => "A database error occurred".to_string(),
			ServerError::NotFound(message) => message.clone(),
			ServerError::InvalidForm(rejection) => rejection.body_text(),
			ServerError::InvalidPath(rejection) => rejection.body_text(),
			ServerError::InvalidJson(rejection) => rejection.body_text(),
		}
	}

	fn log(&self, status: StatusCode) {
		if status.is_server_error() {
			tracing::error!(error = %self, status = status.as_u16(), "request failed");
		} else {
			tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		self.log(status);
		let page = views::error_page(&self.public_message());
		(status, Html(page.into_string())).into_response()
	}
}

/// JSON flavour of [`ServerError`]: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub ServerError);

impl From<ServerError> for ApiError {
	fn from(err: ServerError) -> Self {
		ApiError(err)
	}
}

impl From<DbError> for ApiError {
	fn from(err: DbError) -> Self {
		ApiError(err.into())
	}
}

impl From<PathRejection> for ApiError {
	fn from(err: PathRejection) -> Self {
		ApiError(err.into())
	}
}

impl From<JsonRejection> for ApiError {
	fn from(err: JsonRejection) -> Self {
		ApiError(err.into())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.0.status();
		self.0.log(status);
		let body = serde_json::json!({ "error": self.0.public_message() });
		(status, Json(body)).into_response()
	}
}
