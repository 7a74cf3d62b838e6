//! Live status detection by scanning a channel's public `/live` page.
//!
//! This costs no API quota, but it relies on literal markers in YouTube's page markup (see
//! [`Keywords`]). When YouTube changes that markup the checks degrade silently, typically to an
//! indeterminate result.

use crate::config::Keywords;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Where channel pages are served from.
pub const DEFAULT_WEB_BASE: &str = "https://www.youtube.com";

/// What a channel's `/live` page currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    /// Nothing live or scheduled.
    Idle,
    /// A broadcast is on air.
    Live,
    /// A broadcast is scheduled but has not started.
    Upcoming,
}

impl fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LiveStatus::Idle => "idle",
            LiveStatus::Live => "live",
            LiveStatus::Upcoming => "upcoming",
        })
    }
}

/// Classifies a `/live` page by which markers it contains.
///
/// The live marker wins over the not-live marker; a scheduled broadcast carries both the live
/// and the upcoming markers. Returns `None` if neither the live nor the not-live marker is
/// present.
pub fn classify_live_page(page: &str, keywords: &Keywords) -> Option<LiveStatus> {
    if page.contains(&keywords.live_keyword) {
        if page.contains(&keywords.upcoming_keyword) {
            Some(LiveStatus::Upcoming)
        } else {
            Some(LiveStatus::Live)
        }
    } else if page.contains(&keywords.not_live_keyword) {
        Some(LiveStatus::Idle)
    } else {
        None
    }
}

/// The older, coarser check: a page is live unless it carries the not-live marker.
///
/// Scheduled broadcasts and unrecognizable pages both count as live here.
pub fn page_says_live(page: &str, keywords: &Keywords) -> bool {
    !page.contains(&keywords.not_live_keyword)
}

/// Fetches channel `/live` pages and classifies them.
///
/// Network and HTTP errors are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct LivePageChecker {
    client: reqwest::Client,
    web_base: String,
    keywords: Keywords,
}

impl LivePageChecker {
    pub fn new(keywords: Keywords, client: reqwest::Client) -> Self {
        Self {
            client,
            web_base: DEFAULT_WEB_BASE.to_string(),
            keywords,
        }
    }

    /// Points the checker at a different web host (without trailing slash).
    pub fn with_base_url(mut self, web_base: impl Into<String>) -> Self {
        self.web_base = web_base.into();
        self
    }

    /// Downloads the raw HTML of `channel_id`'s `/live` page.
    #[instrument(skip(self), level = tracing::Level::DEBUG)]
    pub async fn fetch_live_page(&self, channel_id: &str) -> eyre::Result<String> {
        let url = format!("{}/channel/{}/live", self.web_base, channel_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("fetch live page of channel {channel_id}"))?;
        let page = response
            .text()
            .await
            .with_context(|| format!("read live page of channel {channel_id}"))?;
        tracing::trace!(channel = channel_id, bytes = page.len(), "fetched live page");
        Ok(page)
    }

    /// Determines whether `channel_id` is idle, live, or has an upcoming broadcast.
    ///
    /// Returns `Ok(None)` when the page carries none of the known markers, which usually means
    /// YouTube served a verification or age-gate page instead.
    #[instrument(skip(self))]
    pub async fn get_live_status(&self, channel_id: &str) -> eyre::Result<Option<LiveStatus>> {
        let page = self.fetch_live_page(channel_id).await?;
        let status = classify_live_page(&page, &self.keywords);
        match status {
            Some(status) => tracing::debug!(channel = channel_id, %status, "classified live page"),
            None => tracing::warn!(
                channel = channel_id,
                "cannot determine channel status, it may be under verification"
            ),
        }
        Ok(status)
    }

    /// Whether `channel_id` looks live, using only the not-live marker.
    ///
    /// Kept for callers that predate [`Self::get_live_status`].
    #[instrument(skip(self))]
    pub async fn is_live(&self, channel_id: &str) -> eyre::Result<bool> {
        let page = self.fetch_live_page(channel_id).await?;
        Ok(page_says_live(&page, &self.keywords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;
    use hyper::StatusCode;
    use tracing_test::traced_test;

    fn keywords() -> Keywords {
        Keywords {
            not_live_keyword: "LIVE_STREAM_OFFLINE".to_string(),
            live_keyword: "isLiveBroadcast".to_string(),
            upcoming_keyword: "upcomingEventData".to_string(),
        }
    }

    const LIVE_PAGE: &str = r#"<html>{"isLiveBroadcast":"True"}</html>"#;
    const UPCOMING_PAGE: &str =
        r#"<html>{"isLiveBroadcast":"True","upcomingEventData":{"startTime":"1"}}</html>"#;
    const IDLE_PAGE: &str = r#"<html>{"status":"LIVE_STREAM_OFFLINE"}</html>"#;
    const GATED_PAGE: &str = "<html>Sign in to confirm your age</html>";

    #[test]
    fn classification() {
        let kw = keywords();
        assert_eq!(classify_live_page(LIVE_PAGE, &kw), Some(LiveStatus::Live));
        assert_eq!(
            classify_live_page(UPCOMING_PAGE, &kw),
            Some(LiveStatus::Upcoming)
        );
        assert_eq!(classify_live_page(IDLE_PAGE, &kw), Some(LiveStatus::Idle));
        assert_eq!(classify_live_page(GATED_PAGE, &kw), None);
        assert_eq!(classify_live_page("", &kw), None);
    }

    #[test]
    fn live_marker_beats_not_live_marker() {
        let kw = keywords();
        let page = format!("{LIVE_PAGE}{IDLE_PAGE}");
        assert_eq!(classify_live_page(&page, &kw), Some(LiveStatus::Live));
    }

    #[test]
    fn upcoming_marker_alone_is_not_enough() {
        let kw = keywords();
        let page = format!("{IDLE_PAGE}upcomingEventData");
        assert_eq!(classify_live_page(&page, &kw), Some(LiveStatus::Idle));
        assert_eq!(classify_live_page("upcomingEventData", &kw), None);
    }

    #[test]
    fn legacy_check_only_looks_for_not_live_marker() {
        let kw = keywords();
        assert!(page_says_live(LIVE_PAGE, &kw));
        assert!(page_says_live(UPCOMING_PAGE, &kw));
        assert!(page_says_live(GATED_PAGE, &kw));
        assert!(!page_says_live(IDLE_PAGE, &kw));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LiveStatus::Upcoming).unwrap(),
            r#""upcoming""#
        );
        assert_eq!(LiveStatus::Idle.to_string(), "idle");
    }

    #[tokio::test]
    async fn fetches_channel_live_page() {
        let server = TestServer::start([
            ("/channel/UClive/live", StatusCode::OK, LIVE_PAGE),
            ("/channel/UCsoon/live", StatusCode::OK, UPCOMING_PAGE),
            ("/channel/UCidle/live", StatusCode::OK, IDLE_PAGE),
            ("/channel/UCgated/live", StatusCode::OK, GATED_PAGE),
        ])
        .await;
        let checker =
            LivePageChecker::new(keywords(), reqwest::Client::new()).with_base_url(server.base_url());

        assert_eq!(
            checker.get_live_status("UClive").await.unwrap(),
            Some(LiveStatus::Live)
        );
        assert_eq!(
            checker.get_live_status("UCsoon").await.unwrap(),
            Some(LiveStatus::Upcoming)
        );
        assert_eq!(
            checker.get_live_status("UCidle").await.unwrap(),
            Some(LiveStatus::Idle)
        );
        assert_eq!(checker.get_live_status("UCgated").await.unwrap(), None);

        assert!(checker.is_live("UClive").await.unwrap());
        assert!(!checker.is_live("UCidle").await.unwrap());
        assert_eq!(server.hits("/channel/UClive/live"), 2);
    }

    #[tokio::test]
    #[traced_test]
    async fn unrecognized_page_warns() {
        let server = TestServer::start([
            ("/channel/UCidle/live", StatusCode::OK, IDLE_PAGE),
            ("/channel/UCgated/live", StatusCode::OK, GATED_PAGE),
        ])
        .await;
        let checker =
            LivePageChecker::new(keywords(), reqwest::Client::new()).with_base_url(server.base_url());

        assert_eq!(
            checker.get_live_status("UCidle").await.unwrap(),
            Some(LiveStatus::Idle)
        );
        assert!(!logs_contain("under verification"));

        assert_eq!(checker.get_live_status("UCgated").await.unwrap(), None);
        assert!(logs_contain("under verification"));
    }

    #[tokio::test]
    async fn http_errors_propagate() {
        let server = TestServer::start([(
            "/channel/UCbroken/live",
            StatusCode::INTERNAL_SERVER_ERROR,
            "oops",
        )])
        .await;
        let checker =
            LivePageChecker::new(keywords(), reqwest::Client::new()).with_base_url(server.base_url());

        let err = checker.get_live_status("UCbroken").await.unwrap_err();
        assert!(format!("{err:#}").contains("UCbroken"), "{err:#}");
        assert!(checker.is_live("UCbroken").await.is_err());
        // unknown paths 404
        assert!(checker.get_live_status("UCmissing").await.is_err());
    }
}
