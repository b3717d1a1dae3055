use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, models::SimilarArtist, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SimilarArtistsQuery {
    #[serde(default)]
    artist: String,
}

/// Handler for similar artists endpoint
pub async fn similar(
    State(state): State<AppState>,
    Query(params): Query<SimilarArtistsQuery>,
) -> AppResult<Json<Vec<SimilarArtist>>> {
    tracing::debug!(
        artist = %params.artist,
        provider = state.music.name(),
        "Looking up similar artists"
    );

    let artists = state.music.similar_artists(&params.artist).await?;
    Ok(Json(artists))
}
