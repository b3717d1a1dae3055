use futures::future::try_join_all;
use uuid::Uuid;

use crate::{
    db::ProfileStore,
    error::{AppError, AppResult},
    models::{MovieId, MovieSummary, Profile},
    services::providers::MovieCatalog,
};

/// Loads a profile, falling back to an empty one for first-time users
pub async fn get_profile(store: &dyn ProfileStore, user_id: Uuid) -> AppResult<Profile> {
    Ok(store
        .load(user_id)
        .await?
        .unwrap_or_else(|| Profile::empty(user_id)))
}

/// Replaces the user's language preferences
///
/// Entries are trimmed and blank ones dropped, so a form field like
/// `"Spanish, , French"` stores `["Spanish", "French"]`.
pub async fn update_languages(
    store: &dyn ProfileStore,
    user_id: Uuid,
    native_language: &str,
    other_languages: &[String],
) -> AppResult<Profile> {
    let other_languages: Vec<String> = other_languages
        .iter()
        .map(|lang| lang.trim())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect();

    let profile = store
        .save_languages(user_id, native_language.trim(), &other_languages)
        .await?;

    tracing::info!(
        user_id = %user_id,
        native_language = %profile.native_language,
        other_languages = profile.other_languages.len(),
        "Language preferences updated"
    );

    Ok(profile)
}

/// Appends a movie to the user's liked list, returning the updated list
pub async fn add_liked_movie(
    store: &dyn ProfileStore,
    user_id: Uuid,
    movie_id: MovieId,
) -> AppResult<Vec<MovieId>> {
    let liked = store
        .add_liked(user_id, movie_id)
        .await?
        .ok_or_else(|| AppError::Conflict("Already liked".to_string()))?;

    tracing::info!(user_id = %user_id, movie_id = movie_id, "Movie liked");

    Ok(liked)
}

/// Removes a movie from the user's liked list; unknown ids are ignored
pub async fn remove_liked_movie(
    store: &dyn ProfileStore,
    user_id: Uuid,
    movie_id: MovieId,
) -> AppResult<()> {
    store.remove_liked(user_id, movie_id).await?;

    tracing::info!(user_id = %user_id, movie_id = movie_id, "Movie unliked");

    Ok(())
}

/// Hydrates the liked list into full movie records, in liked order
pub async fn liked_movies(
    store: &dyn ProfileStore,
    catalog: &dyn MovieCatalog,
    user_id: Uuid,
) -> AppResult<Vec<MovieSummary>> {
    let profile = get_profile(store, user_id).await?;
    if profile.liked_movie_ids.is_empty() {
        return Ok(Vec::new());
    }

    try_join_all(
        profile
            .liked_movie_ids
            .iter()
            .map(|&movie_id| catalog.fetch_details(movie_id)),
    )
    .await
}
