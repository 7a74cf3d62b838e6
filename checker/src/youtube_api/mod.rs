//! YouTube Data API v3 client library.
//!
//! Only the three read-only, key-authenticated calls needed to find out what a channel is
//! broadcasting are covered:
//!
//! - [`YouTubeClient::search_videos`] finds a channel's live or upcoming broadcasts
//! - [`YouTubeClient::get_video`] fetches the details of one of them
//! - [`YouTubeClient::get_channel`] looks up a channel's display name
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_live_checker::config::Config;
//! use youtube_live_checker::youtube_api::{EventType, YouTubeClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let config = Config::from_path("config.json").await?;
//! let client = YouTubeClient::new(&config.api, reqwest::Client::new());
//!
//! let results = client.search_videos("UC4R8DWoMoI7CAwX8_LjQHig", EventType::Live, 1).await?;
//! for result in results.items {
//!     println!("Broadcast: {} ({:?})", result.snippet.title, result.id.video_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod search;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::YouTubeClient;
pub use types::{EventType, PageInfo, Thumbnail, Thumbnails};

pub use search::{SearchListResponse, SearchResult, SearchResultId, SearchResultSnippet};

pub use videos::{LiveStreamingDetails, Video, VideoListResponse, VideoSnippet};

pub use channels::{Channel, ChannelListResponse, ChannelSnippet};
