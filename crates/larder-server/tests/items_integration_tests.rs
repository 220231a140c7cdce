// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! End-to-end tests for the item pages, JSON API and health check, driven
//! through the router against a file-backed SQLite database.

use std::time::Duration;

use axum::{
	body::Body,
	http::{header, Request, StatusCode},
	response::Response,
	Router,
};
use futures::stream::{self, StreamExt};
use larder_server::{create_app_state, create_router};
use larder_server_config::{
	DatabaseConfig, HttpConfig, LoggingConfig, PathsConfig, SecurityConfig, ServerConfig,
};
use larder_server_db::{Database, Item};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
	router: Router,
	db: Database,
	dir: TempDir,
}

fn test_config(
	url: &str,
	static_dir: &str,
	force_https: bool,
	max_connections: u32,
) -> ServerConfig {
	ServerConfig {
		http: HttpConfig::default(),
		database: DatabaseConfig {
			url: url.to_string(),
			max_connections,
		},
		logging: LoggingConfig::default(),
		paths: PathsConfig {
			static_dir: static_dir.to_string(),
		},
		security: SecurityConfig { force_https },
	}
}

async fn spawn_app_configured(force_https: bool, max_connections: u32) -> TestApp {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join("items.db");
	let url = format!("sqlite:{}", db_path.display());
	let static_dir = dir.path().join("static");
	std::fs::create_dir_all(&static_dir).unwrap();

	let db = Database::connect(&url, max_connections).await.unwrap();
	db.ensure_schema().await.unwrap();

	let config = test_config(
		&url,
		&static_dir.display().to_string(),
		force_https,
		max_connections,
	);
	let state = create_app_state(db.clone(), &config);
	TestApp {
		router: create_router(state),
		db,
		dir,
	}
}

async fn spawn_app_with(force_https: bool) -> TestApp {
	spawn_app_configured(force_https, 2).await
}

async fn spawn_app() -> TestApp {
	spawn_app_with(false).await
}

impl TestApp {
	async fn send(&self, request: Request<Body>) -> Response {
		self.router.clone().oneshot(request).await.unwrap()
	}

	async fn get(&self, uri: &str) -> (StatusCode, String) {
		let response = self
			.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await;
		let status = response.status();
		(status, body_string(response).await)
	}

	async fn post_form(&self, uri: &str, body: &str) -> Response {
		self.send(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(Body::from(body.to_string()))
				.unwrap(),
		)
		.await
	}

	async fn api_items(&self) -> Vec<Item> {
		let (status, body) = self.get("/api/items").await;
		assert_eq!(status, StatusCode::OK);
		serde_json::from_str(&body).unwrap()
	}
}

async fn body_string(response: Response) -> String {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
	response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_index_empty() {
	let app = spawn_app().await;
	let (status, body) = app.get("/").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("No items yet."));
}

#[tokio::test]
async fn test_create_redirects_and_lists_item() {
	let app = spawn_app().await;

	let response = app.post_form("/items/", "name=Widget").await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(location(&response), "/");

	let items = app.api_items().await;
	assert_eq!(items.len(), 1);
	assert!(items[0].id >= 1);
	assert_eq!(items[0].name, "Widget");

	let (status, body) = app.get("/").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("Widget"));
}

#[tokio::test]
async fn test_create_decodes_form_encoding() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=Left+%26+Right").await;

	let items = app.api_items().await;
	assert_eq!(items[0].name, "Left & Right");
}

#[tokio::test]
async fn test_create_without_name_is_rejected() {
	let app = spawn_app().await;

	let response = app.post_form("/items/", "title=Widget").await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
	let body = body_string(response).await;
	assert!(body.contains(r#"class="error""#));

	assert!(app.api_items().await.is_empty());
}

#[tokio::test]
async fn test_item_detail() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=Sprocket").await;
	let id = app.api_items().await[0].id;

	let (status, body) = app.get(&format!("/items/{id}")).await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("Sprocket"));
	assert!(body.contains(&format!("/items/{id}/delete")));
}

#[tokio::test]
async fn test_item_detail_missing_is_404() {
	let app = spawn_app().await;
	let (status, body) = app.get("/items/9999").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert!(body.contains("Item not found"));
}

#[tokio::test]
async fn test_item_detail_non_integer_id() {
	let app = spawn_app().await;
	let (status, body) = app.get("/items/abc").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_delete_leaves_other_items() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=A").await;
	app.post_form("/items/", "name=B").await;
	let items = app.api_items().await;
	let a = items.iter().find(|i| i.name == "A").unwrap();

	let response = app
		.post_form(&format!("/items/{}/delete", a.id), "")
		.await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(location(&response), "/");

	let (_, body) = app.get("/").await;
	assert!(body.contains(">B</a>"));
	assert!(!body.contains(">A</a>"));

	let remaining = app.api_items().await;
	assert_eq!(remaining.len(), 1);
	assert_eq!(remaining[0].name, "B");
}

#[tokio::test]
async fn test_delete_missing_is_404() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=keep").await;

	let response = app.post_form("/items/424242/delete", "").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert!(body_string(response).await.contains("Item not found"));

	assert_eq!(app.api_items().await.len(), 1);
}

#[tokio::test]
async fn test_delete_twice() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=once").await;
	let id = app.api_items().await[0].id;
	let uri = format!("/items/{id}/delete");

	assert_eq!(app.post_form(&uri, "").await.status(), StatusCode::SEE_OTHER);
	assert_eq!(app.post_form(&uri, "").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_names_are_escaped_in_pages() {
	let app = spawn_app().await;
	app.post_form("/items/", "name=%3Cb%3Ebold%3C%2Fb%3E").await;

	let (_, body) = app.get("/").await;
	assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
	assert!(!body.contains("<b>bold</b>"));
}

#[tokio::test]
async fn test_storage_failure_renders_500() {
	let app = spawn_app().await;
	app.db.close().await;

	let (status, body) = app.get("/").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(body.contains("A database error occurred"));
}

#[tokio::test]
async fn test_unknown_path_renders_404_page() {
	let app = spawn_app().await;
	let (status, body) = app.get("/nowhere").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
	let app = spawn_app().await;
	std::fs::write(app.dir.path().join("static/hello.txt"), "hello static").unwrap();

	let (status, body) = app.get("/static/hello.txt").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, "hello static");
}

#[tokio::test]
async fn test_health_check() {
	let app = spawn_app().await;
	let (status, body) = app.get("/health").await;
	assert_eq!(status, StatusCode::OK);
	let json: serde_json::Value = serde_json::from_str(&body).unwrap();
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["database"], "healthy");
}

#[tokio::test]
async fn test_health_check_unhealthy_when_database_closed() {
	let app = spawn_app().await;
	app.db.close().await;

	let (status, body) = app.get("/health").await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	let json: serde_json::Value = serde_json::from_str(&body).unwrap();
	assert_eq!(json["status"], "unhealthy");
}

#[tokio::test]
async fn test_api_create_and_get() {
	let app = spawn_app().await;

	let response = app
		.send(
			Request::builder()
				.method("POST")
				.uri("/api/items")
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(r#"{"name":"Gizmo"}"#))
				.unwrap(),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created: Item = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(created.name, "Gizmo");

	let (status, body) = app.get(&format!("/api/items/{}", created.id)).await;
	assert_eq!(status, StatusCode::OK);
	let fetched: Item = serde_json::from_str(&body).unwrap();
	assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_api_get_missing() {
	let app = spawn_app().await;
	let (status, body) = app.get("/api/items/9999").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	let json: serde_json::Value = serde_json::from_str(&body).unwrap();
	assert_eq!(json["error"], "Item not found");
}

#[tokio::test]
async fn test_api_list_is_ordered_by_id() {
	let app = spawn_app().await;
	for name in ["zeta", "alpha", "mid"] {
		app.post_form("/items/", &format!("name={name}")).await;
	}

	let items = app.api_items().await;
	let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
	assert_eq!(names, ["zeta", "alpha", "mid"]);
	assert!(items.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_api_rejects_malformed_json() {
	let app = spawn_app().await;
	let response = app
		.send(
			Request::builder()
				.method("POST")
				.uri("/api/items")
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from("{not json"))
				.unwrap(),
		)
		.await;
	assert!(response.status().is_client_error());
	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_https_redirect_when_forced() {
	let app = spawn_app_with(true).await;

	let response = app
		.send(
			Request::builder()
				.uri("/items/3?view=full")
				.header(header::HOST, "larder.example.com")
				.body(Body::empty())
				.unwrap(),
		)
		.await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(
		location(&response),
		"https://larder.example.com/items/3?view=full"
	);
}

#[tokio::test]
async fn test_https_requests_pass_through_when_forced() {
	let app = spawn_app_with(true).await;

	let response = app
		.send(
			Request::builder()
				.uri("/")
				.header(header::HOST, "larder.example.com")
				.header("x-forwarded-proto", "https")
				.body(Body::empty())
				.unwrap(),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_https_redirect_by_default() {
	let app = spawn_app().await;
	let (status, _) = app.get("/").await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stalled_form_upload_does_not_hold_a_connection() {
	let app = spawn_app_configured(false, 1).await;

	let body = stream::once(async { Ok::<_, std::io::Error>("name=slow") }).chain(stream::pending());
	let upload = app.router.clone().oneshot(
		Request::builder()
			.method("POST")
			.uri("/items/")
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from_stream(body))
			.unwrap(),
	);
	let upload = tokio::spawn(upload);
	tokio::time::sleep(Duration::from_millis(50)).await;

	let (status, body) = tokio::time::timeout(Duration::from_secs(5), app.get("/"))
		.await
		.expect("index waited on the stalled upload");
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("No items yet."));

	upload.abort();
}
