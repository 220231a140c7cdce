// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Larder item server.
//!
//! Server-rendered pages for listing, creating, viewing and deleting items
//! stored in a single SQL table, plus a small JSON API and a health check.

pub mod api;
pub mod error;
pub mod https_redirect;
pub mod routes;
pub mod version;
pub mod views;

pub use api::{create_app_state, create_router, AppState};
pub use error::{ApiError, ServerError};
pub use larder_server_config::ServerConfig;
