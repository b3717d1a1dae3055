use serde::{Deserialize, Serialize};

/// An artist returned by Last.fm's `artist.getSimilar`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarArtist {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    /// Similarity score in `0..=1`, sent by Last.fm as a string
    #[serde(rename = "match", default)]
    pub match_score: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<ArtistImage>,
    #[serde(default)]
    pub streamable: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistImage {
    #[serde(rename = "#text")]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

impl SimilarArtist {
    /// Parsed similarity score, if Last.fm sent a number
    pub fn score(&self) -> Option<f64> {
        self.match_score.parse().ok()
    }
}

/// Raw `artist.getSimilar` response body
#[derive(Debug, Deserialize)]
pub struct LastFmSimilarResponse {
    pub similarartists: LastFmSimilarArtists,
}

#[derive(Debug, Deserialize)]
pub struct LastFmSimilarArtists {
    #[serde(default)]
    pub artist: Vec<SimilarArtist>,
}

/// Error body Last.fm returns (often with a 200 status)
#[derive(Debug, Deserialize)]
pub struct LastFmError {
    pub error: i64,
    pub message: String,
}
