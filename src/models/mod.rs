use serde::{Deserialize, Serialize};

pub mod artist;
pub mod profile;

pub use artist::SimilarArtist;
pub use profile::{Profile, ProfileResponse};

/// TMDB movie identifier
pub type MovieId = i64;

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// A movie as returned by the catalog (search results, recommendations, details)
///
/// Immutable upstream data. The aggregator only reads `id` and
/// `original_language`; everything else is carried through for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
}

impl MovieSummary {
    /// Release year taken from the `YYYY-MM-DD` release date
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(0..4))
            .and_then(|year| year.parse().ok())
    }

    /// Full poster URL for an image size such as `w200` or `original`
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}/{}{}", TMDB_IMAGE_BASE, size, path))
    }
}

/// Paginated list envelope used by TMDB list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

/// Output of the recommendation aggregator
///
/// Both lists are ordered by how many liked movies recommended the entry,
/// most first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    /// Every unique recommendation regardless of language (diagnostic view)
    pub all_recommendations: Vec<MovieSummary>,
    /// Recommendations whose original language matches the target language
    pub filtered: Vec<MovieSummary>,
}

impl RecommendationResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
