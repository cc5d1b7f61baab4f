use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::platform::PlatformName;

/// A linked account on an external platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformLink {
    pub id: Uuid,
    pub name: PlatformName,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Payload for adding a platform or for the platform list inside a profile upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformLinkInput {
    pub name: PlatformName,
    pub username: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl PlatformLinkInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.username.trim().is_empty() {
            return Err(ModelError::Validation("platform username required".into()));
        }
        Ok(())
    }

    pub fn into_link(self) -> Result<PlatformLink, ModelError> {
        self.validate()?;
        Ok(PlatformLink {
            id: Uuid::new_v4(),
            name: self.name,
            username: self.username.trim().to_string(),
            url: self.url.filter(|u| !u.trim().is_empty()),
        })
    }
}

/// User-owned document aggregating personal info and linked platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    pub created_at: DateTime<Utc>,
}

/// Upsert payload; ids and timestamps are server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformLinkInput>,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("please provide a name".into()));
        }
        for p in &self.platforms {
            p.validate()?;
        }
        Ok(())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Profile {
    pub fn create(user_id: Uuid, input: ProfileInput) -> Result<Self, ModelError> {
        input.validate()?;
        let platforms = input
            .platforms
            .into_iter()
            .map(PlatformLinkInput::into_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name: input.name.trim().to_string(),
            bio: trimmed(input.bio),
            location: trimmed(input.location),
            website: trimmed(input.website),
            tech_stack: input.tech_stack,
            platforms,
            created_at: Utc::now(),
        })
    }

    /// Replace the editable fields, keeping id / owner / creation time.
    pub fn apply(&mut self, input: ProfileInput) -> Result<(), ModelError> {
        input.validate()?;
        self.name = input.name.trim().to_string();
        self.bio = trimmed(input.bio);
        self.location = trimmed(input.location);
        self.website = trimmed(input.website);
        self.tech_stack = input.tech_stack;
        self.platforms = input
            .platforms
            .into_iter()
            .map(PlatformLinkInput::into_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    pub fn add_platform(&mut self, input: PlatformLinkInput) -> Result<&PlatformLink, ModelError> {
        let link = input.into_link()?;
        self.platforms.push(link);
        Ok(self.platforms.last().expect("just pushed"))
    }

    /// Remove a linked platform by link id; returns whether it existed.
    pub fn remove_platform(&mut self, link_id: Uuid) -> bool {
        let before = self.platforms.len();
        self.platforms.retain(|p| p.id != link_id);
        self.platforms.len() != before
    }

    pub fn platform(&self, name: PlatformName) -> Option<&PlatformLink> {
        self.platforms.iter().find(|p| p.name == name)
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            name: self.name.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
            website: self.website.clone(),
            tech_stack: self.tech_stack.clone(),
            platforms: self
                .platforms
                .iter()
                .map(|p| SummaryPlatform {
                    name: p.name,
                    username: p.username.clone(),
                    url: p.url.clone(),
                })
                .collect(),
        }
    }
}

/// Condensed portfolio view for `GET /api/profiles/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub tech_stack: Vec<String>,
    pub platforms: Vec<SummaryPlatform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPlatform {
    pub name: PlatformName,
    pub username: String,
    pub url: Option<String>,
}
