//! Movie recommendation service.
//!
//! Users keep a list of liked movies and language preferences; recommendations
//! are aggregated from the TMDB catalog and filtered by original language.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
