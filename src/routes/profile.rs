use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::{MovieId, MovieSummary, ProfileResponse},
    services::profiles,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub native_language: String,
    #[serde(default)]
    pub other_languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeMovieRequest {
    pub movie_id: MovieId,
}

/// Get the caller's language preferences
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let profile = profiles::get_profile(state.profiles.as_ref(), user_id).await?;
    Ok(Json(ProfileResponse::from(&profile)))
}

/// Replace the caller's language preferences
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = profiles::update_languages(
        state.profiles.as_ref(),
        user_id,
        &request.native_language,
        &request.other_languages,
    )
    .await?;
    Ok(Json(ProfileResponse::from(&profile)))
}

/// Liked movies hydrated from the catalog
pub async fn liked_movies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let movies =
        profiles::liked_movies(state.profiles.as_ref(), state.catalog.as_ref(), user_id).await?;
    Ok(Json(movies))
}

/// Add a movie to the liked list
pub async fn add_liked_movie(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<LikeMovieRequest>,
) -> AppResult<(StatusCode, Json<Vec<MovieId>>)> {
    let liked =
        profiles::add_liked_movie(state.profiles.as_ref(), user_id, request.movie_id).await?;
    Ok((StatusCode::CREATED, Json(liked)))
}

/// Remove a movie from the liked list
pub async fn remove_liked_movie(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<MovieId>,
) -> AppResult<StatusCode> {
    profiles::remove_liked_movie(state.profiles.as_ref(), user_id, movie_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
