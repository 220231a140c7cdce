// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post},
	Router,
};
use larder_server_config::ServerConfig;
use larder_server_db::Database;
use tower_http::services::ServeDir;

use crate::https_redirect::{https_redirect_middleware, HttpsRedirect};
use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub db: Arc<Database>,
	pub static_dir: PathBuf,
	/// `Some` when plain-HTTP requests must be redirected.
	pub https_redirect: Option<HttpsRedirect>,
}

pub fn create_app_state(db: Database, config: &ServerConfig) -> AppState {
	let https_redirect = config.security.force_https.then(|| HttpsRedirect {
		fallback_host: config.http.host.clone(),
	});

	AppState {
		db: Arc::new(db),
		static_dir: PathBuf::from(&config.paths.static_dir),
		https_redirect,
	}
}

pub fn create_router(state: AppState) -> Router {
	let static_dir = state.static_dir.clone();
	let https_redirect = state.https_redirect.clone();

	let api = Router::new()
		.route(
			"/items",
			get(routes::api_items::list_items).post(routes::api_items::create_item),
		)
		.route("/items/{id}", get(routes::api_items::get_item));

	let mut router = Router::new()
		.route("/", get(routes::items::list_items))
		.route("/items/", post(routes::items::create_item))
		.route("/items/{id}", get(routes::items::get_item))
		.route("/items/{id}/delete", post(routes::items::delete_item))
		.route("/health", get(routes::health::health_check))
		.nest("/api", api)
		.nest_service("/static", ServeDir::new(&static_dir))
		.fallback(routes::not_found)
		.with_state(state);

	if let Some(redirect) = https_redirect {
		tracing::info!("redirecting plain HTTP requests to HTTPS");
		router = router.layer(from_fn_with_state(redirect, https_redirect_middleware));
	}

	router
}
