// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::pool::Backend;
use crate::schema::ensure_schema;
use crate::session::Database;

/// Single-connection in-memory pool. The connection never idles out, so the
/// database lives as long as the pool.
pub async fn create_test_pool() -> AnyPool {
	sqlx::any::install_default_drivers();
	AnyPoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.unwrap()
}

pub async fn create_test_database() -> Database {
	let pool = create_test_pool().await;
	ensure_schema(&pool, Backend::Sqlite).await.unwrap();
	Database::from_pool(pool, Backend::Sqlite)
}
