/// Upstream data providers
///
/// The movie catalog (TMDB) supplies search, details and per-movie
/// recommendation lists. The music similarity source (Last.fm) supplies
/// related artists. Handlers and services only see the traits so tests can
/// swap in stubs.
use crate::{
    error::AppResult,
    models::{MovieId, MovieSummary, SimilarArtist},
};

pub mod lastfm;
pub mod tmdb;

pub use lastfm::LastFmProvider;
pub use tmdb::TmdbProvider;

/// Movie catalog abstraction
///
/// Every method is a single upstream request. Failures are surfaced as
/// `AppError::HttpClient` (unreachable) or `AppError::ExternalApi` (bad status
/// or undecodable body). Nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search movies by title
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Movies the catalog recommends for a given movie, in catalog order
    async fn fetch_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>>;

    /// Movies the catalog considers similar (genre/keyword based)
    async fn fetch_similar(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>>;

    /// Full record for a single movie
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieSummary>;

    /// Short upstream name, recorded as the `provider` log field
    fn name(&self) -> &'static str;
}

/// Music similarity abstraction
#[async_trait::async_trait]
pub trait MusicSimilarity: Send + Sync {
    /// Artists similar to the given artist name
    async fn similar_artists(&self, artist: &str) -> AppResult<Vec<SimilarArtist>>;

    /// Short upstream name, recorded as the `provider` log field
    fn name(&self) -> &'static str;
}
