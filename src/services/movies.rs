use crate::{
    error::AppResult,
    models::{MovieId, MovieSummary},
    services::providers::MovieCatalog,
};

/// Service function for movie search
///
/// Blank queries return an empty list without calling the catalog, which
/// keeps search-as-you-type clients from spending upstream quota.
pub async fn search_movies(catalog: &dyn MovieCatalog, query: &str) -> AppResult<Vec<MovieSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    catalog.search_movies(query).await
}

/// Movies the catalog considers similar to `movie_id`
pub async fn similar_movies(catalog: &dyn MovieCatalog, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
    catalog.fetch_similar(movie_id).await
}
