use std::sync::Arc;

use async_trait::async_trait;
use models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// On-disk record: user plus credential material, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    user: User,
    #[serde(default)]
    password_hash: Option<String>,
    #[serde(default)]
    password_algorithm: Option<String>,
}

/// File-backed auth repository persisting users as a JSON map keyed by email.
#[derive(Clone)]
pub struct FileAuthRepository {
    store: Arc<JsonMapStore<String, UserRecord>>,
}

impl FileAuthRepository {
    /// Initialize from the given file path; creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, UserRecord>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

fn repo_err(e: ServiceError) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait]
impl AuthRepository for FileAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.store.get(&email.to_string()).await.map(|r| r.user))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.store.find(|r| r.user.id == id).await.map(|r| r.user))
    }

    async fn create_user(&self, email: &str, name: &str) -> Result<AuthUser, AuthError> {
        let user = User::new(email, name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let key = email.to_string();
        let record = UserRecord { user: user.clone(), password_hash: None, password_algorithm: None };
        let mut inserted = false;
        self.store
            .update_map(|map| {
                if map.contains_key(&key) {
                    return Ok(());
                }
                map.insert(key.clone(), record);
                inserted = true;
                Ok(())
            })
            .await
            .map_err(repo_err)?;
        if !inserted {
            return Err(AuthError::Conflict);
        }
        Ok(user)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let record = self.store.find(|r| r.user.id == user_id).await;
        Ok(record.and_then(|r| {
            Some(Credentials {
                user_id: r.user.id,
                password_hash: r.password_hash?,
                password_algorithm: r.password_algorithm.unwrap_or_else(|| "argon2".into()),
            })
        }))
    }

    async fn upsert_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<Credentials, AuthError> {
        let mut found = false;
        self.store
            .update_map(|map| {
                if let Some(record) = map.values_mut().find(|r| r.user.id == user_id) {
                    record.password_hash = Some(password_hash.clone());
                    record.password_algorithm = Some(password_algorithm.clone());
                    found = true;
                }
                Ok(())
            })
            .await
            .map_err(repo_err)?;
        if !found {
            return Err(AuthError::NotFound);
        }
        Ok(Credentials { user_id, password_hash, password_algorithm })
    }
}
