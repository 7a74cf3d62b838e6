//! Find out whether YouTube channels are live, about to go live, or idle.
//!
//! There are two independent ways of asking:
//!
//! - [`status::LivePageChecker`] scrapes a channel's public `/live` page for marker keywords.
//!   It is cheap and costs no API quota, but depends on YouTube's current page markup.
//! - [`broadcast::LiveChecker`] uses the YouTube Data API to fetch the title, description,
//!   cover image and start time of the broadcast. It is precise but expensive in quota.
//!
//! Both are meant to be driven by an external poller. Nothing here schedules, retries, or
//! persists anything.

pub mod broadcast;
pub mod cache;
pub mod config;
pub mod status;
pub mod youtube_api;

#[cfg(test)]
mod test_server;

pub use broadcast::{BroadcastInfo, LiveChecker, UnknownChannel};
pub use cache::ChannelNameCache;
pub use config::{Config, Keywords};
pub use status::{LivePageChecker, LiveStatus};
pub use youtube_api::EventType;
