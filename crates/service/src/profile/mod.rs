use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use models::profile::{PlatformLinkInput, Profile, ProfileInput, ProfileSummary};
use models::platform::PlatformName;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed profile store, one document per user.
///
/// The map is keyed by the owning user's id, which gives the
/// "one profile per user, POST is an upsert" semantics for free.
#[derive(Clone)]
pub struct ProfileStore {
    store: Arc<JsonMapStore<Uuid, Profile>>,
}

impl ProfileStore {
    /// Initialize the store from a path; creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<Uuid, Profile>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Create the caller's profile, or replace its editable fields if one exists.
    pub async fn upsert(&self, user_id: Uuid, input: ProfileInput) -> Result<Profile, ServiceError> {
        input.validate()?;
        let mut result: Option<Profile> = None;
        self.store
            .update_map(|map| {
                match map.get_mut(&user_id) {
                    Some(existing) => {
                        existing.apply(input)?;
                        result = Some(existing.clone());
                    }
                    None => {
                        let created = Profile::create(user_id, input)?;
                        result = Some(created.clone());
                        map.insert(user_id, created);
                    }
                }
                Ok(())
            })
            .await?;
        let profile = result.expect("upsert always sets a profile");
        info!(user_id = %user_id, profile_id = %profile.id, "profile_upserted");
        Ok(profile)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Option<Profile> {
        self.store.get(&user_id).await
    }

    /// Look up by the profile's own document id.
    pub async fn get_by_id(&self, profile_id: Uuid) -> Option<Profile> {
        self.store.find(|p| p.id == profile_id).await
    }

    pub async fn list_all(&self) -> Vec<Profile> {
        self.store.list().await.into_iter().map(|(_, v)| v).collect()
    }

    /// Delete the caller's profile; idempotent, returns whether one existed.
    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&user_id).await
    }

    pub async fn add_platform(
        &self,
        user_id: Uuid,
        input: PlatformLinkInput,
    ) -> Result<Profile, ServiceError> {
        let mut result: Option<Profile> = None;
        self.store
            .update_map(|map| {
                let profile = map.get_mut(&user_id).ok_or_else(|| ServiceError::not_found("profile"))?;
                profile.add_platform(input)?;
                result = Some(profile.clone());
                Ok(())
            })
            .await?;
        Ok(result.expect("platform added"))
    }

    /// Remove a linked platform by link id; removal of an unknown link is a no-op.
    pub async fn remove_platform(&self, user_id: Uuid, link_id: Uuid) -> Result<Profile, ServiceError> {
        let mut result: Option<Profile> = None;
        self.store
            .update_map(|map| {
                let profile = map.get_mut(&user_id).ok_or_else(|| ServiceError::not_found("profile"))?;
                profile.remove_platform(link_id);
                result = Some(profile.clone());
                Ok(())
            })
            .await?;
        Ok(result.expect("profile present"))
    }

    pub async fn summary(&self, user_id: Uuid) -> Result<ProfileSummary, ServiceError> {
        self.get_by_user(user_id)
            .await
            .map(|p| p.summary())
            .ok_or_else(|| ServiceError::not_found("profile"))
    }

    /// Username linked for the given platform, for the profile-resolved stats routes.
    pub async fn linked_username(
        &self,
        user_id: Uuid,
        name: PlatformName,
    ) -> Result<String, ServiceError> {
        let profile = self
            .get_by_user(user_id)
            .await
            .ok_or_else(|| ServiceError::not_found("profile"))?;
        profile
            .platform(name)
            .map(|p| p.username.clone())
            .ok_or_else(|| ServiceError::not_found(&format!("{name} profile")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_store_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("profiles_{}.json", Uuid::new_v4()))
    }

    fn input(name: &str) -> ProfileInput {
        ProfileInput {
            name: name.into(),
            bio: None,
            location: Some("Berlin".into()),
            website: None,
            tech_stack: vec!["Rust".into()],
            platforms: vec![PlatformLinkInput {
                name: PlatformName::GitHub,
                username: "octo".into(),
                url: None,
            }],
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_replaces() -> anyhow::Result<()> {
        let path = tmp_store_path();
        let store = ProfileStore::new(&path).await?;
        let user_id = Uuid::new_v4();

        let created = store.upsert(user_id, input("Ada")).await?;
        let replaced = store.upsert(user_id, input("Ada L")).await?;
        assert_eq!(created.id, replaced.id);
        assert_eq!(replaced.name, "Ada L");
        assert_eq!(store.list_all().await.len(), 1);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn lookup_by_id_and_user() -> anyhow::Result<()> {
        let path = tmp_store_path();
        let store = ProfileStore::new(&path).await?;
        let user_id = Uuid::new_v4();
        let profile = store.upsert(user_id, input("Ada")).await?;

        assert!(store.get_by_user(user_id).await.is_some());
        assert_eq!(store.get_by_id(profile.id).await.unwrap().id, profile.id);
        assert!(store.get_by_id(Uuid::new_v4()).await.is_none());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn platform_add_remove_and_resolution() -> anyhow::Result<()> {
        let path = tmp_store_path();
        let store = ProfileStore::new(&path).await?;
        let user_id = Uuid::new_v4();
        store.upsert(user_id, input("Ada")).await?;

        let updated = store
            .add_platform(
                user_id,
                PlatformLinkInput {
                    name: PlatformName::Medium,
                    username: "ada-writes".into(),
                    url: None,
                },
            )
            .await?;
        assert_eq!(updated.platforms.len(), 2);

        let username = store.linked_username(user_id, PlatformName::Medium).await?;
        assert_eq!(username, "ada-writes");
        assert!(matches!(
            store.linked_username(user_id, PlatformName::LeetCode).await,
            Err(ServiceError::NotFound(_))
        ));

        let link_id = updated.platforms[1].id;
        let after = store.remove_platform(user_id, link_id).await?;
        assert_eq!(after.platforms.len(), 1);
        // unknown link id is a no-op
        let same = store.remove_platform(user_id, Uuid::new_v4()).await?;
        assert_eq!(same.platforms.len(), 1);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let path = tmp_store_path();
        let store = ProfileStore::new(&path).await?;
        let user_id = Uuid::new_v4();
        store.upsert(user_id, input("Ada")).await?;

        assert!(store.delete_by_user(user_id).await?);
        assert!(!store.delete_by_user(user_id).await?);
        assert!(matches!(store.summary(user_id).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
