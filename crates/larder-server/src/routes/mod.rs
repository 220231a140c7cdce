// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP handlers.

pub mod api_items;
pub mod health;
pub mod items;

use crate::error::ServerError;

/// Fallback for unmatched paths.
pub async fn not_found() -> ServerError {
	ServerError::NotFound("Page not found".to_string())
}
