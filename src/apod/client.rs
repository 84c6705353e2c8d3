/// HTTP client for the APOD endpoint
///
/// One GET per call, no retries, no pagination:
/// `GET <base>?api_key=<key>&start_date=<ISO>&end_date=<ISO>`

use std::time::Duration;

use thiserror::Error;

use super::entry::{normalize, ImageryEntry};
use crate::config::Config;
use crate::state::range::{ValidatedRange, DATE_FORMAT};

/// Why a fetch produced no entries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Network failure, timeout, or an unreadable body
    #[error("{cause}")]
    Transport { cause: String },
}

impl FetchError {
    pub fn transport(cause: impl ToString) -> Self {
        FetchError::Transport {
            cause: cause.to_string(),
        }
    }

    /// Human-readable explanation shown in the error view
    pub fn describe(&self) -> String {
        match self {
            FetchError::Http { status } => {
                format!("The imagery service rejected the request (HTTP {}).", status)
            }
            FetchError::Transport { cause } => {
                format!("Could not reach the imagery service: {}", cause)
            }
        }
    }
}

/// Client for the imagery endpoint
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// clones share one connection pool with the thumbnail loader.
#[derive(Debug, Clone)]
pub struct ApodClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("apod-gallery/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(FetchError::transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// The underlying HTTP client, shared with media downloads
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn build_request(&self, range: &ValidatedRange) -> reqwest::Result<reqwest::Request> {
        let start = range.start().format(DATE_FORMAT).to_string();
        let end = range.end().format(DATE_FORMAT).to_string();

        self.http
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
            ])
            .build()
    }

    /// Fetch all entries for `range`
    pub async fn fetch(&self, range: ValidatedRange) -> Result<Vec<ImageryEntry>, FetchError> {
        let request = self.build_request(&range).map_err(FetchError::transport)?;

        tracing::info!(
            "📡 Fetching APOD entries {} .. {}",
            range.start(),
            range.end()
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("⚠️  APOD request failed with status {}", status);
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::transport)?;
        let entries = normalize(&body)?;

        tracing::info!("✅ Received {} entries", entries.len());
        Ok(entries)
    }
}
