//! Broadcast details and channel names from the YouTube Data API.
//!
//! Two error policies live side by side here, and callers rely on the difference:
//!
//! - [`LiveChecker::get_live_stream_details`] and [`LiveChecker::get_live_stream_video`] never
//!   fail. Any API error (including quota exhaustion) is logged and reported as "nothing found",
//!   since a poller treats both the same way.
//! - [`LiveChecker::get_channel_name`] returns errors, and an [`UnknownChannel`] error in
//!   particular when the channel does not exist, since that points at bad input.

use crate::cache::ChannelNameCache;
use crate::config::Config;
use crate::status::{LivePageChecker, LiveStatus};
use crate::youtube_api::{EventType, SearchResult, Thumbnails, Video, YouTubeClient};
use eyre::Context;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Fixed shift applied to broadcast times to present them as UTC+8 wall-clock time.
///
/// This is a plain offset, not a time zone conversion.
pub const DISPLAY_OFFSET: SignedDuration = SignedDuration::from_hours(8);

/// Summary of a live or upcoming broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastInfo {
    /// URL of the largest available thumbnail.
    pub cover: Option<String>,
    pub title: String,
    pub description: String,
    /// Scheduled start, else actual start, else publish time, shifted by [`DISPLAY_OFFSET`].
    pub publish_time: Timestamp,
    /// The broadcast's video ID.
    pub id: String,
}

/// The channel ID is not known to YouTube.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel ID: {0}")]
pub struct UnknownChannel(pub String);

/// Picks the URL of the largest thumbnail present, from `maxres` down to `default`.
pub fn cover_url(thumbnails: &Thumbnails) -> Option<&str> {
    thumbnails
        .largest_first()
        .into_iter()
        .flatten()
        .map(|thumbnail| thumbnail.url.as_str())
        .next()
}

/// The time a broadcast starts (or started), before any display shift.
///
/// Prefers the scheduled start, then the actual start, then the video's publish time.
pub fn broadcast_start_time(video: &Video) -> Timestamp {
    let details = video.live_streaming_details.as_ref();
    details
        .and_then(|d| d.scheduled_start_time)
        .or_else(|| details.and_then(|d| d.actual_start_time))
        .unwrap_or(video.snippet.published_at)
}

/// Looks up what channels are broadcasting.
///
/// Holds the Data API client, the live-page checker, and a handle to the process-wide
/// [`ChannelNameCache`], which is filled as a side effect of successful lookups.
#[derive(Debug, Clone)]
pub struct LiveChecker {
    yt: YouTubeClient,
    pages: LivePageChecker,
    names: Arc<ChannelNameCache>,
}

impl LiveChecker {
    pub fn new(yt: YouTubeClient, pages: LivePageChecker, names: Arc<ChannelNameCache>) -> Self {
        Self { yt, pages, names }
    }

    /// Builds a checker for `config` whose API client and page checker share one HTTP client.
    pub fn from_config(config: &Config, names: Arc<ChannelNameCache>) -> Self {
        let http = reqwest::Client::new();
        Self::new(
            YouTubeClient::new(&config.api, http.clone()),
            LivePageChecker::new(config.checker.clone(), http),
            names,
        )
    }

    pub fn names(&self) -> &ChannelNameCache {
        &self.names
    }

    /// See [`LivePageChecker::get_live_status`].
    pub async fn get_live_status(&self, channel_id: &str) -> eyre::Result<Option<LiveStatus>> {
        self.pages.get_live_status(channel_id).await
    }

    /// See [`LivePageChecker::is_live`].
    pub async fn is_live(&self, channel_id: &str) -> eyre::Result<bool> {
        self.pages.is_live(channel_id).await
    }

    /// Fetches details of `channel_id`'s current live (or next upcoming) broadcast.
    ///
    /// Costs one search and one video lookup of API quota. Returns `None` both when there is no
    /// such broadcast and when the lookup fails; failures are logged.
    #[instrument(skip(self))]
    pub async fn get_live_stream_details(
        &self,
        channel_id: &str,
        event_type: EventType,
    ) -> Option<BroadcastInfo> {
        match self.fetch_live_stream_details(channel_id, event_type).await {
            Ok(info) => info,
            Err(e) => {
                // most likely the quota ran out
                tracing::warn!(
                    channel = channel_id,
                    %event_type,
                    error = %e,
                    details = %format_args!("{e:#}"),
                    "error while searching video"
                );
                None
            }
        }
    }

    async fn fetch_live_stream_details(
        &self,
        channel_id: &str,
        event_type: EventType,
    ) -> eyre::Result<Option<BroadcastInfo>> {
        let mut results = self
            .yt
            .search_videos(channel_id, event_type, 1)
            .await
            .context("search channel broadcasts")?;
        let Some(video_id) = results.items.pop_front().and_then(|r| r.id.video_id) else {
            tracing::warn!(channel = channel_id, %event_type, "cannot find any video");
            return Ok(None);
        };

        let mut videos = self
            .yt
            .get_video(&video_id)
            .await
            .with_context(|| format!("fetch details of video {video_id}"))?;
        let Some(video) = videos.items.pop_front() else {
            tracing::warn!(
                channel = channel_id,
                %event_type,
                %video_id,
                "cannot find any video"
            );
            return Ok(None);
        };

        self.names
            .set(channel_id, video.snippet.channel_title.clone())
            .await;

        let publish_time = broadcast_start_time(&video)
            .checked_add(DISPLAY_OFFSET)
            .context("shift broadcast time for display")?;
        let cover = cover_url(&video.snippet.thumbnails).map(str::to_string);

        Ok(Some(BroadcastInfo {
            cover,
            title: video.snippet.title,
            description: video.snippet.description,
            publish_time,
            id: video.id,
        }))
    }

    /// Finds `channel_id`'s current live broadcast as a raw search result.
    ///
    /// The older counterpart of [`Self::get_live_stream_details`]: a single search, no video
    /// lookup and no cache update. Failures are logged and reported as `None`.
    #[instrument(skip(self))]
    pub async fn get_live_stream_video(&self, channel_id: &str) -> Option<SearchResult> {
        match self.yt.search_videos(channel_id, EventType::Live, 1).await {
            Ok(mut results) => {
                let first = results.items.pop_front();
                if first.is_none() {
                    tracing::warn!(channel = channel_id, "cannot find any live video");
                }
                first
            }
            Err(e) => {
                tracing::warn!(
                    channel = channel_id,
                    error = %e,
                    details = %format_args!("{e:#}"),
                    "error while searching live video"
                );
                None
            }
        }
    }

    /// Resolves a channel ID to its display name, consulting the cache first.
    ///
    /// Fails with [`UnknownChannel`] if YouTube does not know the ID, and with the underlying
    /// error if the lookup itself fails.
    #[instrument(skip(self))]
    pub async fn get_channel_name(&self, channel_id: &str) -> eyre::Result<String> {
        if let Some(name) = self.names.get(channel_id).await {
            return Ok(name);
        }

        let mut channels = self
            .yt
            .get_channel(channel_id)
            .await
            .with_context(|| format!("look up channel {channel_id}"))?;
        let Some(channel) = channels.items.pop_front() else {
            return Err(UnknownChannel(channel_id.to_string()).into());
        };

        let name = channel.snippet.title;
        self.names.set(channel_id, name.clone()).await;
        Ok(name)
    }
}
