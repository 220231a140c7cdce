// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Item repository.
//!
//! Items are id/name pairs. Ids are assigned by the engine at insert time and
//! listings are ordered by ascending id.

use serde::{Deserialize, Serialize};
use sqlx::{AnyConnection, Connection, FromRow};

use crate::error::DbError;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Item {
	pub id: i64,
	pub name: String,
}

/// Item operations bound to one session's connection.
pub struct ItemRepository<'c> {
	conn: &'c mut AnyConnection,
}

impl<'c> ItemRepository<'c> {
	pub fn new(conn: &'c mut AnyConnection) -> Self {
		Self { conn }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_items(&mut self) -> Result<Vec<Item>, DbError> {
		let items: Vec<Item> = sqlx::query_as("SELECT id, name FROM items ORDER BY id ASC")
			.fetch_all(&mut *self.conn)
			.await?;

		tracing::debug!(count = items.len(), "listed items");
		Ok(items)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_item(&mut self, id: i64) -> Result<Option<Item>, DbError> {
		let item: Option<Item> = sqlx::query_as("SELECT id, name FROM items WHERE id = $1")
			.bind(id)
			.fetch_optional(&mut *self.conn)
			.await?;
		Ok(item)
	}

	/// Insert and commit a new item, returning it with its assigned id.
	#[tracing::instrument(skip(self, name), fields(name_len = name.len()))]
	pub async fn create_item(&mut self, name: &str) -> Result<Item, DbError> {
		let mut tx = self.conn.begin().await?;

		let item: Item =
			sqlx::query_as("INSERT INTO items (name) VALUES ($1) RETURNING id, name")
				.bind(name)
				.fetch_one(&mut *tx)
				.await?;

		tx.commit().await?;
		tracing::info!(item_id = item.id, "created item");
		Ok(item)
	}

	/// Delete an item by id inside one transaction.
	///
	/// # Errors
	/// `DbError::NotFound` if no item has this id; nothing is modified.
	#[tracing::instrument(skip(self))]
	pub async fn delete_item(&mut self, id: i64) -> Result<Item, DbError> {
		let mut tx = self.conn.begin().await?;

		let existing: Option<Item> = sqlx::query_as("SELECT id, name FROM items WHERE id = $1")
			.bind(id)
			.fetch_optional(&mut *tx)
			.await?;

		let Some(item) = existing else {
			tx.rollback().await?;
			return Err(DbError::NotFound(format!("item {id}")));
		};

		sqlx::query("DELETE FROM items WHERE id = $1")
			.bind(id)
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;
		tracing::info!(item_id = id, "deleted item");
		Ok(item)
	}
}
