// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable that carries the connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
	pub url: String,
	pub max_connections: u32,
}

/// Database configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub max_connections: Option<u32>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.max_connections.is_some() {
			self.max_connections = other.max_connections;
		}
	}

	/// Resolve the layer. The connection string has no default.
	pub fn finalize(self) -> Result<DatabaseConfig, ConfigError> {
		let url = self
			.url
			.filter(|u| !u.trim().is_empty())
			.ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_ENV.to_string()))?;

		let max_connections = self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
		if max_connections == 0 {
			return Err(ConfigError::InvalidValue {
				key: "database.max_connections".to_string(),
				message: "must be at least 1".to_string(),
			});
		}

		Ok(DatabaseConfig {
			url: normalize_database_url(&url),
			max_connections,
		})
	}
}

/// Rewrite the legacy `postgres://` scheme to `postgresql://`.
pub fn normalize_database_url(url: &str) -> String {
	match url.strip_prefix("postgres://") {
		Some(rest) => format!("postgresql://{rest}"),
		None => url.to_string(),
	}
}
