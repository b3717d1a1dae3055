/// Last.fm provider
///
/// Only `artist.getSimilar` is used. Last.fm reports most failures as a
/// JSON body with an `error` code, frequently alongside a 200 status, so the
/// body is checked for that shape before decoding the artist list.
use crate::{
    error::{AppError, AppResult},
    models::{
        artist::{LastFmError, LastFmSimilarResponse},
        SimilarArtist,
    },
    services::providers::MusicSimilarity,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct LastFmProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl LastFmProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn parse_similar(body: &str) -> AppResult<Vec<SimilarArtist>> {
        if let Ok(error) = serde_json::from_str::<LastFmError>(body) {
            return Err(AppError::ExternalApi(format!(
                "Last.fm error {}: {}",
                error.error, error.message
            )));
        }

        let response: LastFmSimilarResponse = serde_json::from_str(body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse Last.fm response: {}", e))
        })?;

        Ok(response.similarartists.artist)
    }
}

#[async_trait::async_trait]
impl MusicSimilarity for LastFmProvider {
    async fn similar_artists(&self, artist: &str) -> AppResult<Vec<SimilarArtist>> {
        if artist.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Artist name cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("method", "artist.getSimilar"),
                ("artist", artist),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Error bodies carry more detail than the status line
        let artists = match Self::parse_similar(&body) {
            Ok(artists) if status.is_success() => artists,
            Ok(_) => {
                return Err(AppError::ExternalApi(format!(
                    "Last.fm API returned status {}",
                    status
                )))
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            artist = %artist,
            results = artists.len(),
            provider = "lastfm",
            "Similar artists fetched"
        );

        Ok(artists)
    }

    fn name(&self) -> &'static str {
        "lastfm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> LastFmProvider {
        LastFmProvider::new(
            "test_key".to_string(),
            "http://test.local/2.0/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_similar_artists() {
        let body = r#"{"similarartists": {"artist": [{"name": "Portishead", "match": "0.8", "url": "u", "image": [], "streamable": "0"}], "@attr": {"artist": "Massive Attack"}}}"#;

        let artists = LastFmProvider::parse_similar(body).unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Portishead");
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error": 6, "message": "The artist you supplied could not be found"}"#;

        let result = LastFmProvider::parse_similar(body);
        match result {
            Err(AppError::ExternalApi(msg)) => assert!(msg.contains("could not be found")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        let result = LastFmProvider::parse_similar("<html>");
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_api_url_trimmed() {
        let provider = create_test_provider();
        assert_eq!(provider.api_url, "http://test.local/2.0");
    }

    #[tokio::test]
    async fn test_empty_artist_rejected() {
        let provider = create_test_provider();
        let result = provider.similar_artists("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
