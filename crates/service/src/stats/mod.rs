//! Platform stats adapters.
//!
//! Each adapter fetches (GitHub, LeetCode, Medium) or synthesizes
//! (HackerRank) or politely declines (LinkedIn, X/Twitter) platform data and
//! reshapes it into the stable schemas the dashboard consumes.

use thiserror::Error;

pub mod github;
pub mod hackerrank;
pub mod leetcode;
pub mod linkedin;
pub mod medium;
pub mod twitter;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl StatsError {
    pub(crate) fn upstream(e: impl std::fmt::Display) -> Self {
        Self::Upstream(e.to_string())
    }
}
