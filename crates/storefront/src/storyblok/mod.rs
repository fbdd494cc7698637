//! Storyblok content-delivery API client.
//!
//! One-shot fetches against the CDN endpoint, authenticated by a token
//! passed as a query parameter and scoped by the draft/published version
//! flag. Responses decode into the tolerant types in [`types`].
//!
//! Requests carry no retry or caching; a failed fetch surfaces as a
//! [`ContentError`] for the presentation layer to display. Dropping an
//! in-flight future cancels the underlying request, so an abandoned view
//! never applies a stale result.

pub mod types;

pub use types::{Asset, ProductRecord, StoriesEnvelope, Story, StoryEnvelope};

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::{ContentVersion, StoryblokConfig};

/// Errors that can occur when fetching content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed (network error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status.
    #[error("Unexpected status {0}")]
    Status(u16),

    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No story exists at the requested slug.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the CDN.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Client for the Storyblok content-delivery API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    version: ContentVersion,
}

impl ContentClient {
    /// Create a new content client.
    #[must_use]
    pub fn new(config: &StoryblokConfig) -> Self {
        Self {
            inner: Arc::new(ContentClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: config.token.expose_secret().to_string(),
                version: config.version,
            }),
        }
    }

    /// Fetch a single story by slug.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no story exists at the slug, or
    /// another `ContentError` variant for transport and decode failures.
    pub async fn get_story(&self, slug: &str) -> Result<Story, ContentError> {
        let url = self.endpoint(slug, &[]);
        let envelope: StoryEnvelope = self
            .get_json(url)
            .await
            .map_err(|e| match e {
                ContentError::Status(404) => ContentError::NotFound(slug.to_string()),
                other => other,
            })?;
        Ok(envelope.story)
    }

    /// List stories whose full slug starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a `ContentError` for transport and decode failures. An empty
    /// match is not an error; the list is simply empty.
    pub async fn list_stories(&self, prefix: &str) -> Result<Vec<Story>, ContentError> {
        let url = self.endpoint("", &[("starts_with", prefix)]);
        let envelope: StoriesEnvelope = self.get_json(url).await?;
        Ok(envelope.stories)
    }

    /// Fetch a listing story and keep only its product blocks.
    ///
    /// The listing page authors one product block per entry under the
    /// story's `body`; non-product blocks (heroes, banners) are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_story`].
    pub async fn product_blocks(&self, slug: &str) -> Result<Vec<ProductRecord>, ContentError> {
        let story = self.get_story(slug).await?;
        Ok(story.content.into_product_blocks())
    }

    /// Build a `/stories` endpoint URL with the token and version attached.
    fn endpoint(&self, slug: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.inner.base_url.clone();

        // Url::parse accepted the base, so it is guaranteed non-opaque.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("stories");
            for part in slug.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("version", self.inner.version.as_str());
            query.append_pair("token", &self.inner.token);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        url
    }

    /// Execute a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ContentError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ContentError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Storyblok returned non-success status"
            );
            return Err(ContentError::Status(status.as_u16()));
        }

        match serde_json::from_str(&response_text) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Storyblok response"
                );
                Err(ContentError::Parse(e))
            }
        }
    }
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("version", &self.inner.version)
            .finish_non_exhaustive()
    }
}
