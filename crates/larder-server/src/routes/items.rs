// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server-rendered item pages.
//!
//! Mutations answer with 303 See Other back to `/` so a refresh never
//! resubmits the form. Every handler opens its session only after the
//! request has been fully extracted, so a slow upload never holds a pooled
//! connection.

use axum::{
	extract::{
		rejection::{FormRejection, PathRejection},
		Path, State,
	},
	response::{Html, Redirect},
	Form,
};
use serde::Deserialize;

use crate::{api::AppState, error::ServerError, views};

#[derive(Debug, Deserialize)]
pub struct NewItemForm {
	pub name: String,
}

/// GET / - List all items.
pub async fn list_items(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
	let mut session = state.db.session().await?;
	let items = session.items().list_items().await?;
	Ok(Html(views::index(&items).into_string()))
}

/// POST /items/ - Create an item from the `name` form field.
pub async fn create_item(
	State(state): State<AppState>,
	form: Result<Form<NewItemForm>, FormRejection>,
) -> Result<Redirect, ServerError> {
	let Form(form) = form?;
	let mut session = state.db.session().await?;
	let item = session.items().create_item(&form.name).await?;
	tracing::debug!(item_id = item.id, session_id = session.id(), "item created");
	Ok(Redirect::to("/"))
}

/// GET /items/{id} - Show one item.
pub async fn get_item(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, ServerError> {
	let Path(id) = id?;
	let mut session = state.db.session().await?;
	let item = session
		.items()
		.get_item(id)
		.await?
		.ok_or_else(ServerError::item_not_found)?;
	Ok(Html(views::item_detail(&item).into_string()))
}

/// POST /items/{id}/delete - Delete one item.
pub async fn delete_item(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Redirect, ServerError> {
	let Path(id) = id?;
	let mut session = state.db.session().await?;
	session.items().delete_item(id).await?;
	Ok(Redirect::to("/"))
}
