// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections, one module per concern.

mod database;
mod http;
mod logging;
mod paths;
mod security;

pub use database::{normalize_database_url, DatabaseConfig, DatabaseConfigLayer, DATABASE_URL_ENV};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use paths::{PathsConfig, PathsConfigLayer};
pub use security::{SecurityConfig, SecurityConfigLayer};
