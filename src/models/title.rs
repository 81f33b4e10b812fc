use serde::{Deserialize, Serialize};

/// A normalized catalog entry. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogItem {
    pub title: String,
    /// Synopsis, empty when the source had none
    pub overview: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// Top-billed cast, at most three names
    pub cast: Vec<String>,
    /// Empty when no crew member has the Director job
    pub director: String,
}

impl CatalogItem {
    /// Creates an item with only a title and synopsis
    pub fn new(title: impl Into<String>, overview: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            overview: overview.into(),
            ..Default::default()
        }
    }
}

/// A ranked recommendation produced by the core query path
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f32,
}
