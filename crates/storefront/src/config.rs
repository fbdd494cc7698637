//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORYBLOK_TOKEN` - Storyblok content-delivery API token
//!
//! ## Optional
//! - `STORYBLOK_VERSION` - Content version, `published` or `draft`
//!   (default: published)
//! - `STORYBLOK_BASE_URL` - Content-delivery endpoint override
//!   (default: `https://api.storyblok.com/v2/cdn`)
//! - `CORAL_CART_PATH` - Path of the persisted cart slot; when absent the
//!   cart lives in memory only
//! - `CORAL_DUPLICATE_POLICY` - Duplicate-add behavior, `merge` or `reject`
//!   (default: merge)

use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::cart::DuplicatePolicy;

/// Default Storyblok content-delivery endpoint.
const DEFAULT_BASE_URL: &str = "https://api.storyblok.com/v2/cdn";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storyblok content-delivery API configuration
    pub storyblok: StoryblokConfig,
    /// Path of the persisted cart slot; `None` means in-memory only
    pub cart_path: Option<PathBuf>,
    /// Behavior when adding a line whose identifier already exists
    pub duplicate_policy: DuplicatePolicy,
}

/// Storyblok content-delivery API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct StoryblokConfig {
    /// Content-delivery API base URL
    pub base_url: Url,
    /// Access token, passed as a query parameter on every request
    pub token: SecretString,
    /// Which content version to request
    pub version: ContentVersion,
}

impl std::fmt::Debug for StoryblokConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryblokConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("version", &self.version)
            .finish()
    }
}

/// The draft/published flag sent with every content request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentVersion {
    /// Unpublished drafts, visible with a preview token.
    Draft,
    /// Published content only.
    #[default]
    Published,
}

impl ContentVersion {
    /// Wire value for the `version` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for ContentVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("expected 'draft' or 'published', got '{other}'")),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the token is missing or empty, or if an
    /// optional variable is present but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storyblok = StoryblokConfig::from_env()?;
        let cart_path = get_optional_env("CORAL_CART_PATH").map(PathBuf::from);
        let duplicate_policy = parse_env_or_default(
            "CORAL_DUPLICATE_POLICY",
            DuplicatePolicy::default(),
        )?;

        Ok(Self {
            storyblok,
            cart_path,
            duplicate_policy,
        })
    }
}

impl StoryblokConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let token = get_required_env("STORYBLOK_TOKEN")?;
        if token.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STORYBLOK_TOKEN".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let base_url = get_env_or_default("STORYBLOK_BASE_URL", DEFAULT_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORYBLOK_BASE_URL".to_string(), e.to_string())
            })?;

        let version = parse_env_or_default("STORYBLOK_VERSION", ContentVersion::default())?;

        Ok(Self {
            base_url,
            token: SecretString::from(token),
            version,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, falling back to a default.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
