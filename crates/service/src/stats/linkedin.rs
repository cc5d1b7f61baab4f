//! LinkedIn adapter.
//!
//! LinkedIn offers no public profile API; the adapter returns a structured
//! notice describing the OAuth setup a real integration would need.

use serde::{Deserialize, Serialize};

/// `success` is always false here: there is no data until the user wires up
/// their own credentials.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationNotice {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub api_setup: ApiSetup,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSetup {
    pub required: bool,
    pub platform: String,
    pub description: String,
    pub setup_steps: Vec<String>,
    pub external_api_support: bool,
    pub can_use_external_api: bool,
    pub external_api_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<String>,
}

pub fn profile_notice(username: &str) -> IntegrationNotice {
    tracing::info!(%username, "LinkedIn public profile access attempted");
    IntegrationNotice {
        success: false,
        message: "LinkedIn API Integration Required".into(),
        data: None,
        api_setup: ApiSetup {
            required: true,
            platform: "LinkedIn".into(),
            description: "LinkedIn requires official API credentials for data access".into(),
            setup_steps: vec![
                "Register for LinkedIn Developer Account".into(),
                "Create a LinkedIn App".into(),
                "Configure OAuth 2.0 credentials".into(),
                "Request appropriate permissions (r_liteprofile, r_emailaddress)".into(),
                "Implement OAuth flow for user consent".into(),
            ],
            external_api_support: true,
            can_use_external_api: true,
            external_api_note: "Users can configure their own LinkedIn API credentials".into(),
            rate_limits: None,
        },
    }
}

/// Accepts either a bare username or a pasted profile URL.
pub fn normalize_username(raw: &str) -> String {
    match raw.split_once("linkedin.com/in/") {
        Some((_, rest)) => rest.trim_end_matches('/').to_string(),
        None => raw.trim_end_matches('/').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_forms_reduce_to_username() {
        assert_eq!(normalize_username("ada"), "ada");
        assert_eq!(normalize_username("https://www.linkedin.com/in/ada/"), "ada");
        assert_eq!(normalize_username("linkedin.com/in/ada"), "ada");
    }

    #[test]
    fn notice_shape_matches_dashboard() {
        let v = serde_json::to_value(profile_notice("ada")).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["data"], serde_json::Value::Null);
        assert_eq!(v["apiSetup"]["platform"], "LinkedIn");
        assert_eq!(v["apiSetup"]["setupSteps"].as_array().unwrap().len(), 5);
        assert!(v["apiSetup"].get("rateLimits").is_none());
    }
}
