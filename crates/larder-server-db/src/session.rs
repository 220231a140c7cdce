// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Engine handle and request-scoped sessions.
//!
//! A [`Session`] owns one pooled connection. Dropping it hands the connection
//! back to the pool, so release happens on every exit path, including early
//! returns and panics unwinding through a handler.

use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool};

use crate::error::DbError;
use crate::item::ItemRepository;
use crate::pool::{create_pool, Backend};
use crate::schema::ensure_schema;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Explicitly constructed storage client, shared by all requests.
#[derive(Debug, Clone)]
pub struct Database {
	pool: AnyPool,
	backend: Backend,
}

impl Database {
	/// Connect to `database_url` with at most `max_connections` open connections.
	pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
		let (pool, backend) = create_pool(database_url, max_connections).await?;
		Ok(Self { pool, backend })
	}

	pub fn from_pool(pool: AnyPool, backend: Backend) -> Self {
		Self { pool, backend }
	}

	pub fn backend(&self) -> Backend {
		self.backend
	}

	/// Create the `items` table if it is absent.
	pub async fn ensure_schema(&self) -> Result<(), DbError> {
		ensure_schema(&self.pool, self.backend).await
	}

	/// Open a session for one unit of work.
	pub async fn session(&self) -> Result<Session, DbError> {
		let conn = self.pool.acquire().await?;
		let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
		tracing::trace!(session_id = id, "session opened");
		Ok(Session { id, conn })
	}

	/// Round-trip a trivial query.
	#[tracing::instrument(skip(self))]
	pub async fn ping(&self) -> Result<(), DbError> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}
}

/// A request-scoped connection.
pub struct Session {
	id: u64,
	conn: PoolConnection<Any>,
}

impl Session {
	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn items(&mut self) -> ItemRepository<'_> {
		ItemRepository::new(&mut self.conn)
	}
}

impl std::fmt::Debug for Session {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session").field("id", &self.id).finish()
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		tracing::trace!(session_id = self.id, "session closed");
	}
}
