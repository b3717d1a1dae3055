/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Search: /search/movie → page 1 of matching movies
/// 2. Recommendations: /movie/{id}/recommendations → page 1
/// 3. Similar: /movie/{id}/similar → page 1
/// 4. Details: /movie/{id}
///
/// Authenticates with a v4 read access token in the `Authorization` header.
use crate::{
    error::{AppError, AppResult},
    models::{MovieId, MovieSummary, PaginatedResponse},
    services::providers::MovieCatalog,
};
use reqwest::{header, Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_token: String, api_url: String, language: String, timeout: Duration) -> AppResult<Self> {
        if api_token.trim().is_empty() {
            return Err(AppError::Internal("TMDB API token cannot be empty".to_string()));
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_token,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Issues an authenticated GET without looking at the status
    async fn send(&self, path: &str, query: &[(&str, &str)]) -> AppResult<reqwest::Response> {
        let response = self
            .http_client
            .get(self.url(path))
            .bearer_auth(&self.api_token)
            .header(header::ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())])
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    /// Decodes a JSON body; any non-2xx status is an upstream error
    async fn decode<T: DeserializeOwned>(&self, path: &str, response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}: {}",
                status, path, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    /// Fetches the first page of a movie list endpoint
    async fn get_movie_page(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Vec<MovieSummary>> {
        let mut params = vec![("page", "1")];
        params.extend_from_slice(query);

        let response = self.send(path, &params).await?;
        let page: PaginatedResponse<MovieSummary> = self.decode(path, response).await?;
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let movies = self
            .get_movie_page("/search/movie", &[("query", query), ("include_adult", "false")])
            .await?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn fetch_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
        let movies = self
            .get_movie_page(&format!("/movie/{}/recommendations", movie_id), &[])
            .await?;

        tracing::debug!(
            movie_id = movie_id,
            results = movies.len(),
            provider = "tmdb",
            "Recommendations fetched"
        );

        Ok(movies)
    }

    async fn fetch_similar(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
        let movies = self
            .get_movie_page(&format!("/movie/{}/similar", movie_id), &[])
            .await?;

        tracing::debug!(
            movie_id = movie_id,
            results = movies.len(),
            provider = "tmdb",
            "Similar movies fetched"
        );

        Ok(movies)
    }

    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieSummary> {
        let path = format!("/movie/{}", movie_id);
        let response = self.send(&path, &[]).await?;

        // Only a missing movie is the caller's 404; list endpoints report it as an upstream error
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Movie {}", movie_id)));
        }

        self.decode(&path, response).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
