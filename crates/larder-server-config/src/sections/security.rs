// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport security settings.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityConfig {
	/// Redirect plain-HTTP requests to HTTPS.
	pub force_https: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfigLayer {
	#[serde(default)]
	pub force_https: Option<bool>,
}

impl SecurityConfigLayer {
	pub fn merge(&mut self, other: SecurityConfigLayer) {
		if other.force_https.is_some() {
			self.force_https = other.force_https;
		}
	}

	pub fn finalize(self) -> SecurityConfig {
		SecurityConfig {
			force_https: self.force_https.unwrap_or(false),
		}
	}
}
