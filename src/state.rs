use std::sync::Arc;

use crate::{
    db::ProfileStore,
    middleware::auth::AuthProvider,
    services::{
        providers::{MovieCatalog, MusicSimilarity},
        recommendations::DEFAULT_FILTERED_LIMIT,
    },
};

/// Shared application state
///
/// Every collaborator sits behind a trait object so the router can be
/// built with stubs in tests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
    pub music: Arc<dyn MusicSimilarity>,
    pub profiles: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthProvider>,
    /// Default size of the language-filtered recommendation list
    pub recommendation_limit: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        music: Arc<dyn MusicSimilarity>,
        profiles: Arc<dyn ProfileStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            catalog,
            music,
            profiles,
            auth,
            recommendation_limit: DEFAULT_FILTERED_LIMIT,
        }
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }
}
