use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MovieId;

/// A user's stored profile: liked movies and language preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Profile {
    #[sqlx(rename = "id")]
    pub user_id: Uuid,
    /// Liked movie IDs in the order they were liked
    pub liked_movie_ids: Vec<MovieId>,
    pub native_language: String,
    pub other_languages: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates the profile a user has before saving anything
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            liked_movie_ids: Vec::new(),
            native_language: String::new(),
            other_languages: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn has_liked(&self, movie_id: MovieId) -> bool {
        self.liked_movie_ids.contains(&movie_id)
    }
}

/// Language preferences returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub native_language: String,
    pub other_languages: Vec<String>,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            native_language: profile.native_language.clone(),
            other_languages: profile.other_languages.clone(),
        }
    }
}
