//! Shared types for the YouTube Data API client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paging details for lists of resources.
///
/// Includes the total number of items available and the number of resources
/// returned in a single page response.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The total number of results in the result set.
    ///
    /// For searches this is an approximation and may be far larger than what is actually
    /// retrievable.
    #[serde(default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(default)]
    pub results_per_page: u32,
}

/// The kind of broadcast a `search.list` call is restricted to.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list#eventType>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// Only include active broadcasts.
    Live,
    /// Only include upcoming broadcasts.
    Upcoming,
}

impl EventType {
    /// The value YouTube expects for the `eventType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Live => "live",
            EventType::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single thumbnail image.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// The image's URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// The thumbnail images associated with a resource, keyed by size.
///
/// YouTube only returns the sizes it has generated for the resource, so any of them may be
/// missing. `maxres` and `standard` in particular are often absent for fresh live streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Returns the sizes from largest to smallest.
    pub fn largest_first(&self) -> [Option<&Thumbnail>; 5] {
        [
            self.maxres.as_ref(),
            self.standard.as_ref(),
            self.high.as_ref(),
            self.medium.as_ref(),
            self.default.as_ref(),
        ]
    }
}
