//! In-memory profile store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use careermatch_model::Profile;
use tokio::sync::RwLock;

use crate::CatalogError;

/// Keyed profile storage. Ids are assigned sequentially on create.
#[derive(Debug, Default)]
pub struct ProfileStore {
    next_id: AtomicU64,
    profiles: RwLock<BTreeMap<u64, Profile>>,
}

fn parse_id(id: &str) -> Option<u64> {
    id.parse().ok()
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a profile, returning it with its new id.
    pub async fn create(&self, mut profile: Profile) -> Result<Profile, CatalogError> {
        profile.validate()?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        profile.id = Some(id.to_string());
        self.profiles.write().await.insert(id, profile.clone());

        tracing::debug!(id, "Created profile");
        Ok(profile)
    }

    pub async fn get(&self, id: &str) -> Option<Profile> {
        let key = parse_id(id)?;
        self.profiles.read().await.get(&key).cloned()
    }

    /// Profiles in creation order.
    pub async fn list(&self) -> Vec<Profile> {
        self.profiles.read().await.values().cloned().collect()
    }

    /// Replace a stored profile, keeping its id.
    pub async fn update(&self, id: &str, mut profile: Profile) -> Result<Profile, CatalogError> {
        profile.validate()?;

        let key = parse_id(id).ok_or_else(|| CatalogError::ProfileNotFound(id.to_string()))?;
        let mut profiles = self.profiles.write().await;
        let slot = profiles
            .get_mut(&key)
            .ok_or_else(|| CatalogError::ProfileNotFound(id.to_string()))?;

        profile.id = Some(id.to_string());
        *slot = profile.clone();
        Ok(profile)
    }

    /// Returns false when no profile had this id.
    pub async fn delete(&self, id: &str) -> bool {
        match parse_id(id) {
            Some(key) => self.profiles.write().await.remove(&key).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(name: &str) -> Profile {
        Profile::new(name, 3, vec!["Rust".to_string()])
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let store = ProfileStore::new();
        let a = store.create(profile("a")).await.unwrap();
        let b = store.create(profile("b")).await.unwrap();
        assert_eq!(a.id.as_deref(), Some("1"));
        assert_eq!(b.id.as_deref(), Some("2"));
        assert_eq!(store.get("2").await.unwrap().name, "b");
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let store = ProfileStore::new();
        for name in ["a", "b", "c"] {
            store.create(profile(name)).await.unwrap();
        }
        let names: Vec<String> = store.list().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = ProfileStore::new();
        let created = store.create(profile("a")).await.unwrap();
        let id = created.id.unwrap();

        let updated = store.update(&id, profile("renamed")).await.unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(store.get(&id).await.unwrap().name, "renamed");

        assert!(matches!(
            store.update("99", profile("x")).await,
            Err(CatalogError::ProfileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_profile() {
        let store = ProfileStore::new();
        let mut bad = profile("a");
        bad.expected_salary = Some(-1.0);
        assert!(matches!(store.create(bad).await, Err(CatalogError::InvalidProfile(_))));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = ProfileStore::new();
        let id = store.create(profile("a")).await.unwrap().id.unwrap();
        assert!(store.delete(&id).await);
        assert!(!store.delete(&id).await);
        assert!(!store.delete("not-a-number").await);
        assert!(store.get(&id).await.is_none());
    }
}
