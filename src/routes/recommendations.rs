use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, request_id::RequestId},
    models::RecommendationResult,
    services::{profiles, recommendations},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Target original language; defaults to the profile's native language
    pub language: Option<String>,
    /// Size of the filtered list; defaults to the configured limit.
    /// Kept as text so a bad value is reported as a JSON `InvalidInput`.
    pub limit: Option<String>,
}

impl RecommendationQuery {
    fn limit_or(&self, default: usize) -> AppResult<usize> {
        let limit = match self.limit.as_deref() {
            None => default,
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::InvalidInput(format!("limit must be a positive integer, got {:?}", raw))
            })?,
        };

        if limit == 0 {
            return Err(AppError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }

        Ok(limit)
    }
}

/// Handler for recommendations endpoint
///
/// Seeds are the caller's liked movies.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResult>> {
    let limit = params.limit_or(state.recommendation_limit)?;

    let profile = profiles::get_profile(state.profiles.as_ref(), user_id).await?;
    let language = params
        .language
        .unwrap_or_else(|| profile.native_language.clone());

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        liked_count = profile.liked_movie_ids.len(),
        language = %language,
        "Processing recommendation request"
    );

    let result = recommendations::aggregate(
        state.catalog.as_ref(),
        &profile.liked_movie_ids,
        &language,
        limit,
    )
    .await?;

    Ok(Json(result))
}
