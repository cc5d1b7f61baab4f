//! LeetCode adapter.
//!
//! LeetCode has no official stats API; a chain of community APIs is tried in
//! order and the first usable answer is normalized. Fields the source cannot
//! provide surface as "N/A", matching what the dashboard renders.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::StatsError;

const USER_AGENT: &str = "devlink-app";

#[derive(Clone)]
pub struct LeetcodeClient {
    http: reqwest::Client,
    primary: String,
    fallback: String,
}

impl LeetcodeClient {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, primary: primary.into(), fallback: fallback.into() })
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<LeetcodeStats, StatsError> {
        if username.trim().is_empty() {
            return Err(StatsError::Parse("username is required".into()));
        }

        match self.try_source(&self.primary, username).await {
            Ok(raw) if raw.usable_primary() => {
                debug!(source = %self.primary, "leetcode stats resolved");
                return Ok(normalize(username, raw, LeetcodeSource::Primary));
            }
            Ok(_) => debug!(source = %self.primary, "primary returned non-success status"),
            Err(e) => debug!(source = %self.primary, error = %e, "primary source failed"),
        }

        match self.try_source(&self.fallback, username).await {
            Ok(raw) => {
                debug!(source = %self.fallback, "leetcode stats resolved via fallback");
                Ok(normalize(username, raw, LeetcodeSource::Fallback))
            }
            Err(e) => {
                debug!(source = %self.fallback, error = %e, "fallback source failed");
                Err(StatsError::NotFound(
                    "Unable to fetch LeetCode data. Please check if the username is correct and the profile is public."
                        .into(),
                ))
            }
        }
    }

    async fn try_source(&self, base: &str, username: &str) -> Result<RawLeetcodeStats, StatsError> {
        self.http
            .get(format!("{base}/{username}"))
            .send()
            .await
            .map_err(StatsError::upstream)?
            .error_for_status()
            .map_err(StatsError::upstream)?
            .json::<RawLeetcodeStats>()
            .await
            .map_err(|e| StatsError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum LeetcodeSource {
    Primary,
    Fallback,
}

/// Superset of the fields the community APIs return.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeetcodeStats {
    pub status: Option<String>,
    pub name: Option<String>,
    pub ranking: Option<i64>,
    pub reputation: Option<i64>,
    pub total_solved: Option<u64>,
    pub easy_solved: Option<u64>,
    pub medium_solved: Option<u64>,
    pub hard_solved: Option<u64>,
    pub contest_rating: Option<f64>,
    pub contest_global_ranking: Option<i64>,
    pub contest_attended: Option<u64>,
    pub acceptance_rate: Option<f64>,
    pub contribution_points: Option<i64>,
}

impl RawLeetcodeStats {
    fn usable_primary(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// A stat that serializes as a bare JSON number when the source provides it
/// and as the literal string "N/A" otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    fn int(v: Option<i64>) -> Self {
        v.map(StatValue::Int).unwrap_or_else(Self::na)
    }

    fn float(v: Option<f64>) -> Self {
        v.map(StatValue::Float).unwrap_or_else(Self::na)
    }

    fn na() -> Self {
        StatValue::Text("N/A".into())
    }
}

pub fn normalize(username: &str, raw: RawLeetcodeStats, source: LeetcodeSource) -> LeetcodeStats {
    let (global_ranking, contribution_points) = match source {
        LeetcodeSource::Primary => {
            (StatValue::int(raw.contest_global_ranking), raw.contribution_points.unwrap_or(0))
        }
        // the fallback API does not expose these
        LeetcodeSource::Fallback => (StatValue::na(), 0),
    };

    LeetcodeStats {
        profile: LeetcodeProfile {
            username: username.to_string(),
            real_name: raw.name.unwrap_or_else(|| "N/A".into()),
            ranking: StatValue::int(raw.ranking),
            reputation: raw.reputation.unwrap_or(0),
        },
        problems_solved: ProblemsSolved {
            total: raw.total_solved.unwrap_or(0),
            easy: raw.easy_solved.unwrap_or(0),
            medium: raw.medium_solved.unwrap_or(0),
            hard: raw.hard_solved.unwrap_or(0),
        },
        contest_stats: ContestStats {
            rating: StatValue::float(raw.contest_rating),
            global_ranking,
            attended_contests_count: raw.contest_attended.unwrap_or(0),
        },
        additional_stats: AdditionalStats {
            acceptance_rate: raw.acceptance_rate.unwrap_or(0.0),
            contribution_points,
        },
        last_updated: Utc::now(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeStats {
    pub profile: LeetcodeProfile,
    pub problems_solved: ProblemsSolved,
    pub contest_stats: ContestStats,
    pub additional_stats: AdditionalStats,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeProfile {
    pub username: String,
    pub real_name: String,
    pub ranking: StatValue,
    pub reputation: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemsSolved {
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestStats {
    pub rating: StatValue,
    pub global_ranking: StatValue,
    pub attended_contests_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalStats {
    pub acceptance_rate: f64,
    pub contribution_points: i64,
}
