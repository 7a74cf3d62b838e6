//! Core YouTube Data API client functionality.

use crate::config::ApiConfig;
use crate::youtube_api::{
    channels::ChannelListResponse, search::SearchListResponse, types::EventType,
    videos::VideoListResponse,
};
use eyre::Context;
use http::Method;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the public, key-authenticated part of the YouTube Data API v3.
///
/// Every call costs quota against the key's daily budget, and `search.list` is by far the most
/// expensive one (100 units). With the default quota that works out to roughly 100 searches a
/// day, so callers should poll the detail fetcher sparingly and prefer the live-page checker
/// for frequent status checks.
///
/// There is no retry or backoff here: a failed call surfaces as an error to the caller.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    region_code: Option<String>,
    language: Option<String>,
    api_base: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_base", &self.api_base)
            .field("region_code", &self.region_code)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a new client from the `api` section of the configuration.
    ///
    /// # Arguments
    ///
    /// * `api` - API key and optional locale hints
    /// * `client` - Shared HTTP client for making API requests
    pub fn new(api: &ApiConfig, client: reqwest::Client) -> Self {
        Self {
            api_key: api.key.clone(),
            region_code: api.region_code.clone(),
            language: api.language.clone(),
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        }
    }

    /// Points the client at a different API root (without trailing slash).
    pub fn with_base_url(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Makes a key-authenticated request to the YouTube API with common error handling.
    ///
    /// The API key is appended to `query_params`. Errors never include the request URL since it
    /// carries the key.
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for method-specific JSON parsing.
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = format!("{}/{}", self.api_base, endpoint);

        let response = self
            .client
            .request(method.clone(), &url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send {} request to YouTube API: {}", method, endpoint))?;

        let status_code = response.status();
        if !status_code.is_success() {
            // quota exhaustion shows up here as a 403 with reason `quotaExceeded`
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} {} request failed with status {}: {}",
                method,
                endpoint,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Searches a channel's videos for broadcasts of the given [`EventType`].
    ///
    /// Uses the `search.list` API restricted to `type=video`. Returns at most `max_results`
    /// items, most relevant first. An empty result is not an error.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn search_videos(
        &self,
        channel_id: &str,
        event_type: EventType,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("eventType", event_type.as_str()),
            ("type", "video"),
            ("maxResults", max_results_string.as_str()),
        ];
        if let Some(ref region) = self.region_code {
            query_params.push(("regionCode", region.as_str()));
        }
        if let Some(ref language) = self.language {
            query_params.push(("relevanceLanguage", language.as_str()));
        }

        let response = self
            .make_request(Method::GET, "search", &query_params)
            .await?;

        let results: SearchListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            channel = channel_id,
            %event_type,
            returned_items = results.items.len(),
            "searched channel videos"
        );

        Ok(results)
    }

    /// Fetches the snippet and live streaming details of a single video.
    ///
    /// A stale or removed ID yields a response with no items.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: &str) -> eyre::Result<VideoListResponse> {
        let mut query_params = vec![("part", "snippet,liveStreamingDetails"), ("id", video_id)];
        if let Some(ref language) = self.language {
            query_params.push(("hl", language.as_str()));
        }

        let response = self
            .make_request(Method::GET, "videos", &query_params)
            .await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube videos API response as JSON")?;

        tracing::debug!(
            video_id = video_id,
            returned_items = videos.items.len(),
            "fetched video by ID"
        );

        Ok(videos)
    }

    /// Fetches the snippet of a single channel.
    ///
    /// An unknown ID yields a response with no items.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> eyre::Result<ChannelListResponse> {
        let query_params = [("part", "snippet"), ("id", channel_id)];

        let response = self
            .make_request(Method::GET, "channels", &query_params)
            .await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            channel_id = channel_id,
            returned_items = channels.items.len(),
            "fetched channel by ID"
        );

        Ok(channels)
    }
}
