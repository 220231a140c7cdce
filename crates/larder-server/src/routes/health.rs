// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health check handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub database: HealthStatus,
}

/// GET /health - Database connectivity check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = match state.db.ping().await {
		Ok(()) => HealthStatus::Healthy,
		Err(e) => {
			tracing::warn!(error = %e, "health check: database unreachable");
			HealthStatus::Unhealthy
		}
	};

	let http_status = match database {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(
		http_status,
		Json(HealthResponse {
			status: database,
			database,
		}),
	)
}
