// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Idempotent creation of the `items` table.

use sqlx::AnyPool;

use crate::error::DbError;
use crate::pool::Backend;

const SQLITE_SCHEMA: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS items (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		name TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS ix_items_id ON items (id)",
	"CREATE INDEX IF NOT EXISTS ix_items_name ON items (name)",
];

const POSTGRES_SCHEMA: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS items (
		id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
		name TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS ix_items_id ON items (id)",
	"CREATE INDEX IF NOT EXISTS ix_items_name ON items (name)",
];

fn statements(backend: Backend) -> &'static [&'static str] {
	match backend {
		Backend::Sqlite => SQLITE_SCHEMA,
		Backend::Postgres => POSTGRES_SCHEMA,
	}
}

/// Create the table and its indexes if they do not exist yet.
#[tracing::instrument(skip(pool))]
pub async fn ensure_schema(pool: &AnyPool, backend: Backend) -> Result<(), DbError> {
	for statement in statements(backend) {
		sqlx::query(statement).execute(pool).await?;
	}
	tracing::info!(backend = backend.as_str(), "items schema ready");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	#[tokio::test]
	async fn test_ensure_schema_is_idempotent() {
		let pool = create_test_pool().await;
		ensure_schema(&pool, Backend::Sqlite).await.unwrap();
		ensure_schema(&pool, Backend::Sqlite).await.unwrap();

		let (count,): (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'ix_items_%'",
		)
		.fetch_one(&pool)
		.await
		.unwrap();
		assert_eq!(count, 2);
	}

	#[test]
	fn test_postgres_ddl_uses_identity_column() {
		assert!(statements(Backend::Postgres)[0].contains("GENERATED BY DEFAULT AS IDENTITY"));
		assert!(statements(Backend::Sqlite)[0].contains("AUTOINCREMENT"));
	}
}
