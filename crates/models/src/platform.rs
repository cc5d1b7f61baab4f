use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

/// Closed set of platforms a profile may link. Wire names match the display
/// names the dashboard shows ("Dev.to" keeps its dot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformName {
    GitHub,
    LinkedIn,
    LeetCode,
    HackerRank,
    Medium,
    Twitter,
    X,
    StackOverflow,
    Kaggle,
    CodePen,
    #[serde(rename = "Dev.to")]
    DevTo,
    GitLab,
    Instagram,
    YouTube,
    TikTok,
    Behance,
    Dribbble,
    Other,
}

impl PlatformName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformName::GitHub => "GitHub",
            PlatformName::LinkedIn => "LinkedIn",
            PlatformName::LeetCode => "LeetCode",
            PlatformName::HackerRank => "HackerRank",
            PlatformName::Medium => "Medium",
            PlatformName::Twitter => "Twitter",
            PlatformName::X => "X",
            PlatformName::StackOverflow => "StackOverflow",
            PlatformName::Kaggle => "Kaggle",
            PlatformName::CodePen => "CodePen",
            PlatformName::DevTo => "Dev.to",
            PlatformName::GitLab => "GitLab",
            PlatformName::Instagram => "Instagram",
            PlatformName::YouTube => "YouTube",
            PlatformName::TikTok => "TikTok",
            PlatformName::Behance => "Behance",
            PlatformName::Dribbble => "Dribbble",
            PlatformName::Other => "Other",
        }
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| ModelError::Validation(format!("unknown platform: {s}")))
    }
}

/// Catalog entry served by `GET /api/platforms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub name: PlatformName,
    pub base_url: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

fn entry(
    name: PlatformName,
    base_url: &str,
    description: &str,
    icon: &str,
    category: &str,
    features: &[&str],
) -> PlatformInfo {
    PlatformInfo {
        name,
        base_url: base_url.into(),
        description: description.into(),
        icon: icon.into(),
        category: category.into(),
        features: features.iter().map(|s| s.to_string()).collect(),
    }
}

/// The platforms the dashboard offers when linking an account.
pub static CATALOG: Lazy<Vec<PlatformInfo>> = Lazy::new(|| {
    vec![
        entry(
            PlatformName::GitHub,
            "https://github.com/",
            "Code hosting platform for version control and collaboration",
            "github",
            "developer",
            &[],
        ),
        entry(
            PlatformName::LinkedIn,
            "https://linkedin.com/in/",
            "Professional networking platform",
            "linkedin",
            "social",
            &["posts", "connections", "interactions", "comments"],
        ),
        entry(
            PlatformName::LeetCode,
            "https://leetcode.com/",
            "Platform to help you enhance your skills and prepare for technical interviews",
            "code",
            "developer",
            &[],
        ),
        entry(
            PlatformName::HackerRank,
            "https://www.hackerrank.com/",
            "Competitive programming challenges for both consumers and businesses",
            "code",
            "developer",
            &[],
        ),
        entry(
            PlatformName::Medium,
            "https://medium.com/@",
            "Online publishing platform",
            "book",
            "content",
            &[],
        ),
        entry(
            PlatformName::X,
            "https://x.com/",
            "Social networking service (formerly Twitter)",
            "twitter",
            "social",
            &["tweets", "likes", "retweets", "replies"],
        ),
        entry(
            PlatformName::StackOverflow,
            "https://stackoverflow.com/users/",
            "Question and answer site for professional and enthusiast programmers",
            "stack",
            "developer",
            &[],
        ),
        entry(
            PlatformName::DevTo,
            "https://dev.to/",
            "Community of software developers",
            "code",
            "content",
            &[],
        ),
        entry(
            PlatformName::CodePen,
            "https://codepen.io/",
            "Social development environment for front-end designers and developers",
            "code",
            "developer",
            &[],
        ),
        entry(
            PlatformName::Kaggle,
            "https://www.kaggle.com/",
            "Online community of data scientists and machine learning practitioners",
            "database",
            "developer",
            &[],
        ),
        entry(
            PlatformName::Instagram,
            "https://www.instagram.com/",
            "Photo and video sharing social networking service",
            "instagram",
            "social",
            &[],
        ),
        entry(
            PlatformName::YouTube,
            "https://www.youtube.com/",
            "Video sharing platform",
            "youtube",
            "content",
            &[],
        ),
        entry(
            PlatformName::GitLab,
            "https://gitlab.com/",
            "DevOps platform that combines Git repository management",
            "git",
            "developer",
            &[],
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for name in [PlatformName::GitHub, PlatformName::DevTo, PlatformName::X] {
            let s = serde_json::to_string(&name).unwrap();
            let back: PlatformName = serde_json::from_str(&s).unwrap();
            assert_eq!(back, name);
        }
        assert_eq!(serde_json::to_string(&PlatformName::DevTo).unwrap(), "\"Dev.to\"");
    }

    #[test]
    fn from_str_matches_display() {
        let p: PlatformName = "HackerRank".parse().unwrap();
        assert_eq!(p, PlatformName::HackerRank);
        assert!("Friendster".parse::<PlatformName>().is_err());
    }

    #[test]
    fn catalog_lists_core_platforms() {
        assert_eq!(CATALOG.len(), 13);
        assert!(CATALOG.iter().any(|p| p.name == PlatformName::GitHub));
        let linkedin = CATALOG.iter().find(|p| p.name == PlatformName::LinkedIn).unwrap();
        assert_eq!(linkedin.category, "social");
        assert!(!linkedin.features.is_empty());
    }
}
