use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::ProfileStore,
    error::AppResult,
    models::{MovieId, Profile},
};

/// Process-local profile store for development and tests
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }

    async fn save_languages(
        &self,
        user_id: Uuid,
        native_language: &str,
        other_languages: &[String],
    ) -> AppResult<Profile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id));
        profile.native_language = native_language.to_string();
        profile.other_languages = other_languages.to_vec();
        profile.updated_at = chrono::Utc::now();
        Ok(profile.clone())
    }

    async fn add_liked(&self, user_id: Uuid, movie_id: MovieId) -> AppResult<Option<Vec<MovieId>>> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id));
        if profile.has_liked(movie_id) {
            return Ok(None);
        }
        profile.liked_movie_ids.push(movie_id);
        profile.updated_at = chrono::Utc::now();
        Ok(Some(profile.liked_movie_ids.clone()))
    }

    async fn remove_liked(&self, user_id: Uuid, movie_id: MovieId) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        if let Some(profile) = profiles.get_mut(&user_id) {
            profile.liked_movie_ids.retain(|&id| id != movie_id);
            profile.updated_at = chrono::Utc::now();
        }
        Ok(())
    }
}
