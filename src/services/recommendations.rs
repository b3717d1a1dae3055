use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::{
    error::AppResult,
    models::{MovieId, MovieSummary, RecommendationResult},
    services::providers::MovieCatalog,
};

/// Upper bound on the unfiltered recommendation list
pub const ALL_RECOMMENDATIONS_CAP: usize = 50;

/// Default size of the language-filtered list
pub const DEFAULT_FILTERED_LIMIT: usize = 20;

/// A candidate and the number of seed lists it appeared in
#[derive(Debug, Clone)]
struct FrequencyEntry {
    movie: MovieSummary,
    count: usize,
}

/// Insertion-ordered frequency accumulator keyed by movie id
///
/// Entries live in a vector in first-seen order; the map only points into it.
/// The first summary seen for an id is kept, later sightings just bump the count.
#[derive(Debug, Default)]
struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    index: HashMap<MovieId, usize>,
}

impl FrequencyTable {
    fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, movie: &MovieSummary) {
        match self.index.get(&movie.id) {
            Some(&position) => self.entries[position].count += 1,
            None => {
                self.index.insert(movie.id, self.entries.len());
                self.entries.push(FrequencyEntry {
                    movie: movie.clone(),
                    count: 1,
                });
            }
        }
    }

    /// Most frequent first; `sort_by` is stable so ties keep first-seen order
    fn into_ranked(self, cap: usize) -> Vec<MovieSummary> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(cap);
        entries.into_iter().map(|entry| entry.movie).collect()
    }
}

/// Folds per-seed recommendation lists into ranked results
///
/// `per_seed` must be in seed order: first-seen order decides ties.
fn rank_recommendations(
    seed_ids: &[MovieId],
    per_seed: &[Vec<MovieSummary>],
    target_language: &str,
    limit: usize,
) -> RecommendationResult {
    let seeds: HashSet<MovieId> = seed_ids.iter().copied().collect();
    let mut all = FrequencyTable::new();
    let mut filtered = FrequencyTable::new();

    for candidates in per_seed {
        for candidate in candidates {
            if seeds.contains(&candidate.id) {
                continue;
            }
            all.record(candidate);
            // Literal comparison: "ko" and "KO" are different languages here
            if candidate.original_language == target_language {
                filtered.record(candidate);
            }
        }
    }

    RecommendationResult {
        all_recommendations: all.into_ranked(ALL_RECOMMENDATIONS_CAP),
        filtered: filtered.into_ranked(limit),
    }
}

/// Aggregates catalog recommendations for a set of liked movies
///
/// Issues one recommendation request per seed id (concurrently), then ranks
/// every candidate by how many seeds recommended it. Movies that are
/// themselves seeds are never returned. `filtered` holds only candidates
/// whose original language equals `target_language`, capped at `limit`;
/// `all_recommendations` is capped at [`ALL_RECOMMENDATIONS_CAP`].
///
/// Any failed request fails the whole aggregation.
pub async fn aggregate(
    catalog: &dyn MovieCatalog,
    seed_ids: &[MovieId],
    target_language: &str,
    limit: usize,
) -> AppResult<RecommendationResult> {
    if seed_ids.is_empty() {
        return Ok(RecommendationResult::empty());
    }

    let start = Instant::now();

    tracing::info!(
        seed_count = seed_ids.len(),
        target_language = %target_language,
        limit = limit,
        provider = catalog.name(),
        "Aggregating recommendations"
    );

    // try_join_all yields results in input order, whatever order they complete in
    let per_seed = try_join_all(
        seed_ids
            .iter()
            .map(|&seed_id| catalog.fetch_recommendations(seed_id)),
    )
    .await
    .map_err(|e| {
        tracing::warn!(error = %e, "Recommendation fetch failed, aborting aggregation");
        e
    })?;

    let result = rank_recommendations(seed_ids, &per_seed, target_language, limit);

    tracing::info!(
        all_count = result.all_recommendations.len(),
        filtered_count = result.filtered.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Recommendations aggregated"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockMovieCatalog;
    use mockall::predicate::eq;

    fn movie(id: MovieId, lang: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {}", id),
            original_title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            original_language: lang.to_string(),
            genre_ids: Vec::new(),
            popularity: 0.0,
            vote_average: 0.0,
            vote_count: 0,
            adult: false,
            video: false,
        }
    }

    fn ids(movies: &[MovieSummary]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }

    /// Mock catalog answering each seed with a fixed list
    fn catalog_with(lists: Vec<(MovieId, Vec<MovieSummary>)>) -> MockMovieCatalog {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_name().return_const("mock");
        for (seed, list) in lists {
            catalog
                .expect_fetch_recommendations()
                .with(eq(seed))
                .returning(move |_| Ok(list.clone()));
        }
        catalog
    }

    #[tokio::test]
    async fn test_no_seeds_skips_catalog() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_fetch_recommendations().never();
        catalog.expect_name().return_const("mock");

        let result = aggregate(&catalog, &[], "ko", 20).await.unwrap();
        assert_eq!(result, RecommendationResult::empty());
    }

    #[tokio::test]
    async fn test_ranks_by_frequency_then_first_seen() {
        let catalog = catalog_with(vec![
            (1, vec![movie(10, "en"), movie(11, "ko")]),
            (2, vec![movie(10, "en"), movie(12, "ko")]),
        ]);

        let result = aggregate(&catalog, &[1, 2], "ko", 20).await.unwrap();
        assert_eq!(ids(&result.all_recommendations), vec![10, 11, 12]);
        assert_eq!(ids(&result.filtered), vec![11, 12]);
    }

    #[tokio::test]
    async fn test_seed_never_recommended_back() {
        let catalog = catalog_with(vec![(5, vec![movie(5, "en"), movie(6, "en")])]);

        let result = aggregate(&catalog, &[5], "en", 20).await.unwrap();
        assert_eq!(ids(&result.all_recommendations), vec![6]);
        assert_eq!(ids(&result.filtered), vec![6]);
    }

    #[tokio::test]
    async fn test_other_seed_excluded_even_when_recommended() {
        let catalog = catalog_with(vec![
            (1, vec![movie(2, "en"), movie(3, "en")]),
            (2, vec![movie(1, "en"), movie(3, "en")]),
        ]);

        let result = aggregate(&catalog, &[1, 2], "en", 20).await.unwrap();
        assert_eq!(ids(&result.all_recommendations), vec![3]);
    }

    #[tokio::test]
    async fn test_unmatched_language_yields_empty_filtered() {
        let catalog = catalog_with(vec![
            (1, vec![movie(10, "en")]),
            (2, vec![movie(11, "ko")]),
            (3, vec![movie(12, "ja")]),
        ]);

        let result = aggregate(&catalog, &[1, 2, 3], "fr", 20).await.unwrap();
        assert!(result.filtered.is_empty());
        assert_eq!(ids(&result.all_recommendations), vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn test_language_match_is_case_sensitive() {
        let catalog = catalog_with(vec![(1, vec![movie(10, "ko"), movie(11, "KO")])]);

        let result = aggregate(&catalog, &[1], "ko", 20).await.unwrap();
        assert_eq!(ids(&result.filtered), vec![10]);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog
            .expect_fetch_recommendations()
            .returning(|_| Err(AppError::ExternalApi("TMDB API returned status 503".into())));

        let result = aggregate(&catalog, &[1], "ko", 20).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_one_failing_seed_fails_everything() {
        let mut catalog = catalog_with(vec![(1, vec![movie(10, "ko")])]);
        catalog
            .expect_fetch_recommendations()
            .with(eq(2))
            .returning(|_| Err(AppError::ExternalApi("timeout".into())));

        let result = aggregate(&catalog, &[1, 2], "ko", 20).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_caps_applied() {
        let many: Vec<MovieSummary> = (100..180).map(|id| movie(id, "ko")).collect();
        let catalog = catalog_with(vec![(1, many)]);

        let result = aggregate(&catalog, &[1], "ko", 7).await.unwrap();
        assert_eq!(result.all_recommendations.len(), ALL_RECOMMENDATIONS_CAP);
        assert_eq!(ids(&result.filtered), (100..107).collect::<Vec<_>>());
    }

    #[test]
    fn test_first_seen_summary_is_kept() {
        let mut renamed = movie(10, "ko");
        renamed.title = "Renamed".to_string();
        let per_seed = vec![vec![movie(10, "en")], vec![renamed]];

        let result = rank_recommendations(&[1, 2], &per_seed, "ko", 20);
        assert_eq!(result.all_recommendations[0].title, "Movie 10");
        assert_eq!(result.all_recommendations[0].original_language, "en");
        // Each sighting is checked against the target language on its own
        assert_eq!(ids(&result.filtered), vec![10]);
    }

    #[test]
    fn test_filtered_is_subset_with_matching_rank() {
        let per_seed = vec![
            vec![movie(20, "ko"), movie(21, "en"), movie(22, "ko")],
            vec![movie(22, "ko"), movie(21, "en")],
            vec![movie(22, "ko"), movie(23, "ko")],
        ];

        let result = rank_recommendations(&[1, 2, 3], &per_seed, "ko", 20);
        assert_eq!(ids(&result.all_recommendations), vec![22, 21, 20, 23]);
        assert_eq!(ids(&result.filtered), vec![22, 20, 23]);
        for m in &result.filtered {
            assert!(result.all_recommendations.contains(m));
        }
    }

    #[test]
    fn test_tie_break_follows_seed_then_list_order() {
        let per_seed = vec![
            vec![movie(30, "en"), movie(31, "en")],
            vec![movie(32, "en"), movie(31, "en"), movie(30, "en")],
        ];

        // 30 and 31 both count 2: 30 seen first. 32 count 1.
        let result = rank_recommendations(&[1, 2], &per_seed, "en", 20);
        assert_eq!(ids(&result.all_recommendations), vec![30, 31, 32]);
    }

    #[test]
    fn test_duplicate_seed_counts_each_occurrence() {
        let per_seed = vec![
            vec![movie(40, "en")],
            vec![movie(41, "en")],
            vec![movie(40, "en")],
        ];

        let result = rank_recommendations(&[1, 2, 1], &per_seed, "en", 20);
        assert_eq!(ids(&result.all_recommendations), vec![40, 41]);
    }
}
