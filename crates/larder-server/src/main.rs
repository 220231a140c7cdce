// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Larder server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use larder_server::{create_app_state, create_router, version};
use larder_server_db::Database;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Larder server - server-rendered item list backed by SQL.
#[derive(Parser, Debug)]
#[command(name = "larder-server", about = "Larder item server", version)]
struct Args {
	/// TOML config file (defaults to /etc/larder/server.toml)
	#[arg(long, env = "LARDER_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for larder-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Fails without DATABASE_URL, before anything is bound
	let config = match args.config {
		Some(path) => larder_server_config::load_config_with_file(path)?,
		None => larder_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		"starting larder-server"
	);

	let db = Database::connect(&config.database.url, config.database.max_connections).await?;
	db.ensure_schema().await?;
	tracing::info!(backend = db.backend().as_str(), "database ready");

	let state = create_app_state(db.clone(), &config);
	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	db.close().await;
	tracing::info!("Server shutdown complete");
	Ok(())
}
