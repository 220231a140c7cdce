// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Filesystem paths.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// Directory served verbatim under `/static`.
	pub static_dir: String,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			static_dir: "./static".to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfigLayer {
	#[serde(default)]
	pub static_dir: Option<String>,
}

impl PathsConfigLayer {
	pub fn merge(&mut self, other: PathsConfigLayer) {
		if other.static_dir.is_some() {
			self.static_dir = other.static_dir;
		}
	}

	pub fn finalize(self) -> PathsConfig {
		PathsConfig {
			static_dir: self
				.static_dir
				.unwrap_or_else(|| PathsConfig::default().static_dir),
		}
	}
}
