// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! JSON item endpoints under `/api`.

use axum::{
	extract::{
		rejection::{JsonRejection, PathRejection},
		Path, State,
	},
	http::StatusCode,
	Json,
};
use larder_server_db::Item;
use serde::Deserialize;

use crate::{
	api::AppState,
	error::{ApiError, ServerError},
};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
	pub name: String,
}

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
	let mut session = state.db.session().await?;
	let items = session.items().list_items().await?;
	Ok(Json(items))
}

/// POST /api/items
pub async fn create_item(
	State(state): State<AppState>,
	body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
	let Json(request) = body?;
	let mut session = state.db.session().await?;
	let item = session.items().create_item(&request.name).await?;
	Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items/{id}
pub async fn get_item(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
	let Path(id) = id?;
	let mut session = state.db.session().await?;
	let item = session
		.items()
		.get_item(id)
		.await?
		.ok_or_else(ServerError::item_not_found)?;
	Ok(Json(item))
}
