use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieId, MovieSummary},
    services::movies,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    tracing::debug!(request_id = %request_id, query = %params.q, "Searching movies");

    let results = movies::search_movies(state.catalog.as_ref(), &params.q).await?;
    Ok(Json(results))
}

/// Handler for movie details endpoint
pub async fn details(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<MovieSummary>> {
    let movie = state.catalog.fetch_details(movie_id).await?;
    Ok(Json(movie))
}

/// Handler for similar movies endpoint
pub async fn similar(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let results = movies::similar_movies(state.catalog.as_ref(), movie_id).await?;
    Ok(Json(results))
}
