//! OAuth token cache for the Directory API
//!
//! The cache file is the `token.json` written by the Google OAuth installed-app
//! flow. Tokens close to expiry are refreshed and written back atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var holding a ready-to-use access token; bypasses the cache
pub const ACCESS_TOKEN_ENV: &str = "LISTSYNC_ACCESS_TOKEN";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Refresh tokens that expire within this window
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no token cache at {path}; authorize once and save the token there")]
    Missing { path: PathBuf },

    #[error("failed to read token cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid token cache {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("access token expired and the cache holds no refresh token")]
    Expired,

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("failed to save refreshed token to {path}: {message}")]
    Save { path: PathBuf, message: String },
}

/// Contents of `token.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCache {
    #[serde(alias = "token")]
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl TokenCache {
    /// True when the token is expired or will be within the margin.
    /// A token without an expiry is taken as valid.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_MARGIN_SECS) <= now,
            None => false,
        }
    }

    fn apply_refresh(&mut self, response: RefreshResponse, now: DateTime<Utc>) {
        self.access_token = response.access_token;
        self.expiry = response.expires_in.map(|secs| now + Duration::seconds(secs));
        if let Some(refresh) = response.refresh_token {
            self.refresh_token = Some(refresh);
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Supplies bearer tokens for the Directory API
#[derive(Debug)]
pub struct TokenSource {
    path: PathBuf,
    http: reqwest::blocking::Client,
}

impl TokenSource {
    pub fn new(path: impl Into<PathBuf>, http: reqwest::blocking::Client) -> Self {
        Self {
            path: path.into(),
            http,
        }
    }

    /// A usable access token.
    ///
    /// Uses `LISTSYNC_ACCESS_TOKEN` when set; otherwise loads the cache and
    /// refreshes it when needed.
    pub fn access_token(&self) -> Result<String, CredentialError> {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                tracing::debug!("using access token from {}", ACCESS_TOKEN_ENV);
                return Ok(token.trim().to_string());
            }
        }

        let mut cache = load_cache(&self.path)?;
        let now = Utc::now();
        if !cache.needs_refresh(now) {
            return Ok(cache.access_token);
        }

        tracing::info!(path = %self.path.display(), "refreshing access token");
        let response = self.refresh(&cache)?;
        cache.apply_refresh(response, now);
        save_cache(&self.path, &cache)?;
        Ok(cache.access_token)
    }

    fn refresh(&self, cache: &TokenCache) -> Result<RefreshResponse, CredentialError> {
        let refresh_token = cache.refresh_token.as_deref().ok_or(CredentialError::Expired)?;

        let params = [
            ("client_id", cache.client_id.as_deref().unwrap_or("")),
            ("client_secret", cache.client_secret.as_deref().unwrap_or("")),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&cache.token_uri)
            .form(&params)
            .send()
            .map_err(|e| CredentialError::Refresh(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CredentialError::Refresh(format!(
                "{} {}",
                status.as_u16(),
                body.trim()
            )));
        }

        response
            .json()
            .map_err(|e| CredentialError::Refresh(e.to_string()))
    }
}

pub fn load_cache(path: &Path) -> Result<TokenCache, CredentialError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CredentialError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            CredentialError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| CredentialError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the cache via a temp file in the same directory, then rename.
pub fn save_cache(path: &Path, cache: &TokenCache) -> Result<(), CredentialError> {
    let save_err = |message: String| CredentialError::Save {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let json = serde_json::to_string_pretty(cache).map_err(|e| save_err(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| save_err(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| save_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| save_err(e.error.to_string()))?;
    Ok(())
}
