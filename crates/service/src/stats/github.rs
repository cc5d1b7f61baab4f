//! GitHub adapter.
//!
//! Two REST calls (user + repos, best-effort events) reshaped into the
//! dashboard schema: aggregate star/fork/watcher counts, a language
//! histogram, the top non-fork repositories, and recent public activity.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::StatsError;

const USER_AGENT: &str = "devlink-app";
const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        Self::with_base(DEFAULT_API_BASE, token, timeout_secs)
    }

    /// Custom API base, used by tests to point at a stub server.
    pub fn with_base(
        api_base: impl Into<String>,
        token: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, api_base: api_base.into(), token })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(format!("{}{}", self.api_base, path))
            .header(header::ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            req = req.header(header::AUTHORIZATION, format!("token {token}"));
        }
        req
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<GithubStats, StatsError> {
        if username.trim().is_empty() {
            return Err(StatsError::Parse("username is required".into()));
        }

        let user_resp = self
            .get(&format!("/users/{username}"))
            .send()
            .await
            .map_err(StatsError::upstream)?;
        match user_resp.status() {
            StatusCode::NOT_FOUND => {
                return Err(StatsError::NotFound("GitHub user not found".into()))
            }
            StatusCode::FORBIDDEN => {
                return Err(StatsError::RateLimited(
                    "GitHub API rate limit exceeded. Please try again later.".into(),
                ))
            }
            s if !s.is_success() => {
                return Err(StatsError::Upstream(format!("GitHub API returned {s}")))
            }
            _ => {}
        }
        let user: GhUser = user_resp.json().await.map_err(|e| StatsError::Parse(e.to_string()))?;

        let repos: Vec<GhRepo> = self
            .get(&format!("/users/{username}/repos?sort=updated&per_page=100"))
            .send()
            .await
            .map_err(StatsError::upstream)?
            .error_for_status()
            .map_err(StatsError::upstream)?
            .json()
            .await
            .map_err(|e| StatsError::Parse(e.to_string()))?;

        // Recent activity is best effort; a failed events call never fails the request.
        let events = match self
            .get(&format!("/users/{username}/events/public?per_page=10"))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                resp.json::<Vec<GhEvent>>().await.unwrap_or_default()
            }
            Ok(resp) => {
                debug!(status = %resp.status(), "events fetch declined");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not fetch recent activity");
                Vec::new()
            }
        };

        Ok(aggregate(user, repos, events))
    }
}

/// Pure aggregation step over already-fetched upstream payloads.
pub fn aggregate(user: GhUser, repos: Vec<GhRepo>, events: Vec<GhEvent>) -> GithubStats {
    let total_stars: u64 = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks: u64 = repos.iter().map(|r| r.forks_count).sum();
    let total_watchers: u64 = repos.iter().map(|r| r.watchers_count).sum();

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for repo in &repos {
        if let Some(lang) = repo.language.as_deref() {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }
    let mut languages: Vec<(String, u64)> =
        counts.into_iter().map(|(lang, n)| (lang.to_string(), n)).collect();
    languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    languages.truncate(10);
    let languages = LanguageHistogram(languages);

    let mut own_repos: Vec<&GhRepo> = repos.iter().filter(|r| !r.fork).collect();
    own_repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    let top_repositories: Vec<TopRepo> = own_repos
        .into_iter()
        .take(5)
        .map(|r| TopRepo {
            name: r.name.clone(),
            description: r.description.clone(),
            stars: r.stargazers_count,
            forks: r.forks_count,
            language: r.language.clone(),
            url: r.html_url.clone(),
            updated_at: r.updated_at.clone(),
        })
        .collect();

    let recent_activity: Vec<ActivityEvent> = events
        .into_iter()
        .take(5)
        .map(|e| {
            let payload = e.payload.unwrap_or_default();
            ActivityEvent {
                kind: e.kind,
                repo: e.repo.map(|r| r.name),
                created_at: e.created_at,
                payload: ActivityPayload {
                    action: payload.action,
                    git_ref: payload.git_ref,
                    commits: payload.commits.map(|c| c.len()).unwrap_or(0),
                },
            }
        })
        .collect();

    GithubStats {
        profile: GithubProfile {
            username: user.login,
            name: user.name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            company: user.company,
            location: user.location,
            email: user.email,
            blog: user.blog,
            twitter_username: user.twitter_username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        },
        stats: GithubCounters {
            public_repos: user.public_repos,
            public_gists: user.public_gists,
            followers: user.followers,
            following: user.following,
            total_stars,
            total_forks,
            total_watchers,
        },
        languages,
        top_repositories,
        recent_activity,
        last_updated: Utc::now(),
    }
}

// ---- upstream payloads ----

#[derive(Debug, Deserialize)]
pub struct GhUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Debug, Deserialize)]
pub struct GhRepo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub html_url: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GhEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: Option<GhEventRepo>,
    pub created_at: Option<String>,
    pub payload: Option<GhEventPayload>,
}

#[derive(Debug, Deserialize)]
pub struct GhEventRepo {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GhEventPayload {
    pub action: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub commits: Option<Vec<serde_json::Value>>,
}

// ---- normalized output ----

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub profile: GithubProfile,
    pub stats: GithubCounters,
    pub languages: LanguageHistogram,
    pub top_repositories: Vec<TopRepo>,
    pub recent_activity: Vec<ActivityEvent>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GithubProfile {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GithubCounters {
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_watchers: u64,
}

/// Repo counts per language, most-used first. Serializes as a JSON object
/// whose keys keep that order, which is what the dashboard charts consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageHistogram(pub Vec<(String, u64)>);

impl Serialize for LanguageHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (lang, count) in &self.0 {
            map.serialize_entry(lang, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageHistogram {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> serde::de::Visitor<'de> for MapVisitor {
            type Value = LanguageHistogram;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of language name to repo count")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(LanguageHistogram(entries))
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub url: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: Option<String>,
    pub created_at: Option<String>,
    pub payload: ActivityPayload,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityPayload {
    pub action: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub commits: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> GhUser {
        serde_json::from_value(serde_json::json!({
            "login": "octocat",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "public_gists": 2,
            "followers": 100,
            "following": 9,
            "html_url": "https://github.com/octocat"
        }))
        .unwrap()
    }

    fn repo(name: &str, stars: u64, lang: Option<&str>, fork: bool) -> GhRepo {
        GhRepo {
            name: name.into(),
            description: None,
            stargazers_count: stars,
            forks_count: stars / 2,
            watchers_count: stars,
            language: lang.map(|s| s.to_string()),
            fork,
            html_url: Some(format!("https://github.com/octocat/{name}")),
            updated_at: None,
        }
    }

    #[test]
    fn aggregates_counts_and_languages() {
        let repos = vec![
            repo("a", 10, Some("Rust"), false),
            repo("b", 5, Some("Rust"), false),
            repo("c", 20, Some("Go"), true),
            repo("d", 1, None, false),
        ];
        let stats = aggregate(user(), repos, vec![]);

        assert_eq!(stats.stats.total_stars, 36);
        assert_eq!(stats.stats.total_forks, 17);
        assert_eq!(stats.stats.public_repos, 8);

        // Rust has two repos, Go one
        assert_eq!(stats.languages.0, vec![("Rust".to_string(), 2), ("Go".to_string(), 1)]);
    }

    #[test]
    fn language_histogram_serializes_as_ordered_object() {
        let repos = vec![
            repo("a", 0, Some("Rust"), false),
            repo("b", 0, Some("Rust"), false),
            repo("c", 0, Some("TypeScript"), false),
            repo("d", 0, Some("Go"), false),
        ];
        let stats = aggregate(user(), repos, vec![]);
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["languages"]["Rust"], 2);
        assert_eq!(v["languages"]["Go"], 1);

        // key order in the emitted JSON follows repo count, then name
        let wire = serde_json::to_string(&stats.languages).unwrap();
        let rust = wire.find("\"Rust\"").unwrap();
        let go = wire.find("\"Go\"").unwrap();
        let ts = wire.find("\"TypeScript\"").unwrap();
        assert!(rust < go && go < ts);

        let back: LanguageHistogram = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, stats.languages);
    }

    #[test]
    fn top_repositories_skip_forks_and_sort_by_stars() {
        let repos = vec![
            repo("small", 1, Some("Rust"), false),
            repo("forked", 100, Some("Go"), true),
            repo("big", 50, Some("Rust"), false),
        ];
        let stats = aggregate(user(), repos, vec![]);
        let names: Vec<&str> = stats.top_repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["big", "small"]);
    }

    #[test]
    fn activity_truncated_to_five_with_commit_counts() {
        let events: Vec<GhEvent> = (0..8)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "type": "PushEvent",
                    "repo": {"name": format!("octocat/r{i}")},
                    "created_at": "2025-05-01T00:00:00Z",
                    "payload": {"ref": "refs/heads/main", "commits": [{}, {}]}
                }))
                .unwrap()
            })
            .collect();
        let stats = aggregate(user(), vec![], events);
        assert_eq!(stats.recent_activity.len(), 5);
        assert_eq!(stats.recent_activity[0].payload.commits, 2);
        assert_eq!(stats.recent_activity[0].kind, "PushEvent");
    }

    #[test]
    fn wire_shape_matches_dashboard_expectations() {
        let stats = aggregate(user(), vec![repo("a", 3, Some("Rust"), false)], vec![]);
        let v = serde_json::to_value(&stats).unwrap();
        assert!(v.get("topRepositories").is_some());
        assert!(v.get("recentActivity").is_some());
        assert!(v.get("lastUpdated").is_some());
        assert!(v["stats"].get("total_stars").is_some());
        assert!(v["profile"].get("username").is_some());
    }
}
