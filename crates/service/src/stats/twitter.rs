//! X/Twitter adapter.
//!
//! The X API requires paid developer credentials; like LinkedIn, the adapter
//! answers with a structured integration notice, including the timeline rate
//! limits a real integration has to respect.

use super::linkedin::{ApiSetup, IntegrationNotice};

pub fn tweets_notice(username: &str) -> IntegrationNotice {
    tracing::info!(%username, "X API access attempted");
    IntegrationNotice {
        success: false,
        message: "X API Integration Required".into(),
        data: None,
        api_setup: ApiSetup {
            required: true,
            platform: "X (Twitter)".into(),
            description: "X API requires official developer credentials and has usage limits".into(),
            setup_steps: vec![
                "Apply for X Developer Account".into(),
                "Create an X App in the Developer Portal".into(),
                "Generate API keys and access tokens".into(),
                "Configure OAuth 1.0a or OAuth 2.0".into(),
                "Implement rate limiting and error handling".into(),
            ],
            external_api_support: true,
            can_use_external_api: true,
            external_api_note: "Users can configure their own X API credentials".into(),
            rate_limits: Some("300 requests per 15-minute window for user timeline".into()),
        },
    }
}

/// Accepts a bare handle or a pasted x.com / twitter.com URL.
pub fn normalize_username(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.contains("x.com/") || trimmed.contains("twitter.com/") {
        trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
    } else {
        trimmed.to_string()
    }
}
