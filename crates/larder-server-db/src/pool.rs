// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::error::DbError;

/// SQL dialect behind a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
	Sqlite,
	Postgres,
}

impl Backend {
	pub fn from_url(database_url: &str) -> Result<Self, DbError> {
		if database_url.starts_with("sqlite:") {
			Ok(Backend::Sqlite)
		} else if database_url.starts_with("postgresql://") || database_url.starts_with("postgres://") {
			Ok(Backend::Postgres)
		} else {
			let scheme = database_url
				.split_once(':')
				.map(|(scheme, _)| scheme)
				.unwrap_or(database_url);
			Err(DbError::UnsupportedBackend(scheme.to_string()))
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Backend::Sqlite => "sqlite",
			Backend::Postgres => "postgres",
		}
	}
}

/// Create a pool for the given connection string.
///
/// SQLite files are created if missing unless the URL already sets `mode`.
///
/// # Errors
/// Returns `DbError::UnsupportedBackend` for schemes other than `sqlite:` and
/// `postgresql://`, or `DbError::Sqlx` if the first connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(
	database_url: &str,
	max_connections: u32,
) -> Result<(AnyPool, Backend), DbError> {
	let backend = Backend::from_url(database_url)?;
	sqlx::any::install_default_drivers();

	let url = match backend {
		Backend::Sqlite => sqlite_url_with_create(database_url),
		Backend::Postgres => database_url.to_string(),
	};

	let pool = AnyPoolOptions::new()
		.max_connections(max_connections)
		.connect(&url)
		.await?;

	if backend == Backend::Sqlite {
		sqlx::query("PRAGMA journal_mode = WAL")
			.execute(&pool)
			.await?;
	}

	tracing::debug!(backend = backend.as_str(), "database pool created");
	Ok((pool, backend))
}

fn sqlite_url_with_create(database_url: &str) -> String {
	if database_url.contains(":memory:") || database_url.contains("mode=") {
		return database_url.to_string();
	}
	let separator = if database_url.contains('?') { '&' } else { '?' };
	format!("{database_url}{separator}mode=rwc")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_backend_from_url() {
		assert_eq!(Backend::from_url("sqlite:./larder.db").unwrap(), Backend::Sqlite);
		assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
		assert_eq!(
			Backend::from_url("postgresql://localhost/items").unwrap(),
			Backend::Postgres
		);
		assert_eq!(
			Backend::from_url("postgres://localhost/items").unwrap(),
			Backend::Postgres
		);
	}

	#[test]
	fn test_unsupported_backend() {
		let err = Backend::from_url("mysql://localhost/items").unwrap_err();
		assert!(matches!(err, DbError::UnsupportedBackend(ref s) if s == "mysql"));
	}

	#[test]
	fn test_sqlite_url_gets_create_mode() {
		assert_eq!(sqlite_url_with_create("sqlite:./a.db"), "sqlite:./a.db?mode=rwc");
		assert_eq!(
			sqlite_url_with_create("sqlite:./a.db?cache=shared"),
			"sqlite:./a.db?cache=shared&mode=rwc"
		);
		assert_eq!(sqlite_url_with_create("sqlite:./a.db?mode=ro"), "sqlite:./a.db?mode=ro");
		assert_eq!(sqlite_url_with_create("sqlite::memory:"), "sqlite::memory:");
	}

	#[tokio::test]
	async fn test_create_pool_creates_sqlite_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("fresh.db");
		let url = format!("sqlite:{}", path.display());

		let (pool, backend) = create_pool(&url, 1).await.unwrap();
		assert_eq!(backend, Backend::Sqlite);
		assert!(path.exists());
		pool.close().await;
	}

	#[tokio::test]
	async fn test_create_pool_rejects_unknown_scheme() {
		let result = create_pool("redis://localhost", 1).await;
		assert!(matches!(result, Err(DbError::UnsupportedBackend(_))));
	}
}
