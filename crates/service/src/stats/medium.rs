//! Medium adapter.
//!
//! Medium publishes a public RSS feed per author; items are mapped to a flat
//! article list with a tag-stripped content snippet.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::StatsError;

const USER_AGENT: &str = "devlink-app";
const DEFAULT_FEED_BASE: &str = "https://medium.com/feed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub content: String,
    pub categories: Vec<String>,
}

#[derive(Clone)]
pub struct MediumClient {
    http: reqwest::Client,
    feed_base: String,
}

impl MediumClient {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        Self::with_base(DEFAULT_FEED_BASE, timeout_secs)
    }

    /// Custom feed base, used by tests to point at a stub server.
    pub fn with_base(feed_base: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, feed_base: feed_base.into() })
    }

    pub async fn fetch_articles(&self, username: &str) -> Result<Vec<Article>, StatsError> {
        if username.trim().is_empty() {
            return Err(StatsError::Parse("username is required".into()));
        }
        let bytes = self
            .http
            .get(format!("{}/@{}", self.feed_base, username))
            .send()
            .await
            .map_err(StatsError::upstream)?
            .error_for_status()
            .map_err(StatsError::upstream)?
            .bytes()
            .await
            .map_err(StatsError::upstream)?;
        parse_feed(&bytes)
    }
}

/// Parse an RSS document into the article list.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Article>, StatsError> {
    let channel = rss::Channel::read_from(bytes).map_err(|e| StatsError::Parse(e.to_string()))?;
    Ok(channel
        .items()
        .iter()
        .map(|item| Article {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().map(|s| s.to_string()),
            pub_date: item.pub_date().map(|s| s.to_string()),
            content: snippet(item.description().unwrap_or_default()),
            categories: item.categories().iter().map(|c| c.name().to_string()).collect(),
        })
        .collect())
}

/// Strip markup and collapse whitespace into a plain-text snippet.
fn snippet(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
