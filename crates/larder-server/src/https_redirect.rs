// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Plain-HTTP to HTTPS redirect middleware.
//!
//! Behind a TLS-terminating proxy the client scheme arrives in
//! `X-Forwarded-Proto`; anything other than `https` is redirected with 307 so
//! the method and body are preserved. Any explicit port on the incoming
//! `Host` is dropped, since it names the plain-HTTP listener; the redirect
//! always targets the default HTTPS port.

use axum::{
	extract::{Request, State},
	http::{header, HeaderMap},
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
};

#[derive(Debug, Clone)]
pub struct HttpsRedirect {
	/// Used when the request carries no `Host` header.
	pub fallback_host: String,
}

pub async fn https_redirect_middleware(
	State(config): State<HttpsRedirect>,
	request: Request,
	next: Next,
) -> Response {
	if is_https(request.headers(), request.uri().scheme_str()) {
		return next.run(request).await;
	}

	let host = request
		.headers()
		.get(header::HOST)
		.and_then(|h| h.to_str().ok())
		.unwrap_or(&config.fallback_host);
	let path_and_query = request
		.uri()
		.path_and_query()
		.map(|pq| pq.as_str())
		.unwrap_or("/");

	let location = redirect_target(host, path_and_query);
	tracing::debug!(%location, "redirecting to https");
	Redirect::temporary(&location).into_response()
}

fn is_https(headers: &HeaderMap, uri_scheme: Option<&str>) -> bool {
	let forwarded = headers
		.get("x-forwarded-proto")
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.split(',').next())
		.map(|v| v.trim());

	match forwarded {
		Some(proto) => proto.eq_ignore_ascii_case("https"),
		None => uri_scheme == Some("https"),
	}
}

fn redirect_target(host: &str, path_and_query: &str) -> String {
	let host = strip_port(host);
	format!("https://{host}{path_and_query}")
}

fn strip_port(host: &str) -> &str {
	match host.rsplit_once(':') {
		// a bare IPv6 literal has colons but no port
		Some((name, port))
			if !port.is_empty()
				&& port.bytes().all(|b| b.is_ascii_digit())
				&& (name.ends_with(']') || !name.contains(':')) =>
		{
			name
		}
		_ => host,
	}
}
