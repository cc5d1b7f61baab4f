use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Account holder. The password hash lives with the auth repository, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, name: &str) -> Result<Self, ModelError> {
        validate_email(email)?;
        validate_name(name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_trims_name() {
        let u = User::new("dev@example.com", "  Dev  ").unwrap();
        assert_eq!(u.name, "Dev");
        assert_eq!(u.email, "dev@example.com");
    }

    #[test]
    fn rejects_bad_email() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@leading").is_err());
        assert!(validate_email("trailing@").is_err());
        assert!(validate_email("ok@example.com").is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        assert!(validate_name("   ").is_err());
    }
}
