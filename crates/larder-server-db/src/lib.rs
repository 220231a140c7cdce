// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # larder-server-db
//!
//! Persistence layer for the Larder server using sqlx's `Any` driver, so the
//! same queries run against SQLite and PostgreSQL.
//!
//! ## Sessions
//!
//! [`Database`] is the explicitly constructed storage client handed to the
//! router. Each request opens a [`Session`] which owns one pooled connection
//! until it is dropped. Repository methods run against that connection:
//!
//! ```rust,ignore
//! let db = Database::connect("sqlite:./larder.db", 5).await?;
//! db.ensure_schema().await?;
//!
//! let mut session = db.session().await?;
//! let item = session.items().create_item("Widget").await?;
//! ```
//!
//! ## Error Handling
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | The caller named an id that should exist (delete by id) |
//! | `Sqlx` | Let sqlx errors propagate via `?` |
//! | `UnsupportedBackend` | Connection string scheme is neither SQLite nor PostgreSQL |
//!
//! Lookups where absence is normal return `Result<Option<T>>`.
//!
//! ## Placeholders
//!
//! Queries use `$N` placeholders, which both SQLite and PostgreSQL accept.

mod error;
pub mod item;
pub mod pool;
pub mod schema;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use error::{DbError, Result};
pub use item::{Item, ItemRepository};
pub use pool::{create_pool, Backend};
pub use schema::ensure_schema;
pub use session::{Database, Session};
