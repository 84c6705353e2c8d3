/// Imagery entries and payload normalization
///
/// The APOD endpoint answers a ranged query with a JSON array, but a
/// single-day query may come back as a bare object. Both shapes are
/// normalized into an ordered `Vec<ImageryEntry>` in the order received.

use chrono::NaiveDate;
use serde::Deserialize;

use super::client::FetchError;

/// Which rendering template an entry uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `"video"` maps to Video, anything else (including a missing field) to Image
    pub fn from_media_type(media_type: Option<&str>) -> Self {
        match media_type {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

/// One day's astronomy imagery record
#[derive(Debug, Clone, PartialEq)]
pub struct ImageryEntry {
    pub title: String,
    pub date: NaiveDate,
    pub media_kind: MediaKind,
    /// Full content (image or video page)
    pub primary_url: String,
    pub thumbnail_url: Option<String>,
    pub explanation: String,
}

impl ImageryEntry {
    /// Source used for the gallery tile: the thumbnail if present, otherwise the full image
    pub fn display_url(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.primary_url)
    }
}

/// A record as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawRecord {
    title: String,
    date: NaiveDate,
    #[serde(default)]
    url: String,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl From<RawRecord> for ImageryEntry {
    fn from(raw: RawRecord) -> Self {
        Self {
            media_kind: MediaKind::from_media_type(raw.media_type.as_deref()),
            title: raw.title,
            date: raw.date,
            primary_url: raw.url,
            // An empty string is as good as absent
            thumbnail_url: raw.thumbnail_url.filter(|url| !url.is_empty()),
            explanation: raw.explanation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<RawRecord>),
    One(RawRecord),
}

/// Parse a response body into entries, preserving the order received
pub fn normalize(body: &[u8]) -> Result<Vec<ImageryEntry>, FetchError> {
    let payload: Payload = serde_json::from_slice(body)
        .map_err(|e| FetchError::transport(format!("malformed response: {}", e)))?;

    let records = match payload {
        Payload::Many(records) => records,
        Payload::One(record) => vec![record],
    };

    Ok(records.into_iter().map(ImageryEntry::from).collect())
}
