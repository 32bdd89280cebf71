//! Per-request context used when rendering responses.
//!
//! Stored files are referenced by name in the database; clients get an
//! absolute URL built from the configured public URL or, failing that, from
//! the request's `X-Forwarded-Proto` and `Host` headers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::HOST;
use axum::http::request::Parts;

use crate::domain::MediaStorage;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Media settings shared by every handler state.
#[derive(Clone)]
pub struct MediaContext {
    pub storage: Arc<dyn MediaStorage>,
    /// Overrides the scheme and host taken from request headers.
    pub public_url: Option<String>,
}

/// Absolute URL builder for the current request.
#[derive(Clone)]
pub struct RequestContext {
    base_url: String,
    storage: Arc<dyn MediaStorage>,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn MediaStorage>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, storage }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a site-relative path into an absolute URL. Already absolute
    /// URLs are returned unchanged.
    pub fn build_absolute_uri(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of a stored media file.
    pub fn file_url(&self, name: &str) -> String {
        self.build_absolute_uri(&self.storage.url(name))
    }
}

fn base_url_from_headers(parts: &Parts) -> String {
    let scheme = parts
        .headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = parts
        .headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| parts.uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

impl<S> FromRequestParts<S> for RequestContext
where
    MediaContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let media = MediaContext::from_ref(state);
        let base_url = match media.public_url {
            Some(url) => url,
            None => base_url_from_headers(parts),
        };
        Ok(RequestContext::new(base_url, media.storage))
    }
}
