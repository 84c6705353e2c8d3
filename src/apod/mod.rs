/// APOD data access module
///
/// This module handles:
/// - Issuing the date-range request (client.rs)
/// - Normalizing the response into imagery entries (entry.rs)
/// - Downloading thumbnails and full images (media.rs)

pub mod client;
pub mod entry;
pub mod media;

pub use client::{ApodClient, FetchError};
pub use entry::{ImageryEntry, MediaKind};
