//! YouTube Search API types.

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// Contains a list of [`SearchResult`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`]. An empty `items` list is a normal
/// response and simply means nothing matched.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#searchListResponse`.
    pub kind: String,
    /// A list of results that match the search criteria.
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    #[serde(default)]
    pub page_info: PageInfo,
}

/// A search result contains information about a YouTube resource that matches the search
/// parameters.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: SearchResultSnippet,
}

/// Identifies the resource that matched the search request.
///
/// Only one of the ID fields is set, depending on `kind`. Since we always search with
/// `type=video`, `video_id` is the one we care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    /// The type of the resource, such as `youtube#video`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// Basic details about a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSnippet {
    /// The creation date and time of the resource.
    pub published_at: Timestamp,
    /// The ID of the channel that published the resource.
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    /// `live`, `upcoming`, or `none`.
    #[serde(default)]
    pub live_broadcast_content: Option<String>,
}
