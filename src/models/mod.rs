use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod title;

pub use title::{CatalogItem, Recommendation};

// ============================================================================
// Source Table Types
// ============================================================================

/// One row of the movies table. Extra columns are ignored; empty cells read as `None`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
}

/// One row of the credits table. Extra columns are ignored; empty cells read as `None`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreditRecord {
    pub title: String,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// A movies row joined with a credits row on title.
///
/// `genres`, `keywords`, `cast` and `crew` still hold the encoded
/// list-of-objects strings exactly as read from the sources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMetadataRecord {
    pub title: String,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from the OMDb title endpoint
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OmdbResponse {
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

// ============================================================================
// API Response Types
// ============================================================================

/// Recommendation enriched with a poster for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedTitle {
    pub title: String,
    pub score: f32,
    pub poster_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub query: String,
    /// Title the query resolved to, if any
    pub matched_title: Option<String>,
    pub recommendations: Vec<RecommendedTitle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleMatch {
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogStats {
    pub items: usize,
    pub vocabulary_size: usize,
    pub built_at: DateTime<Utc>,
}
