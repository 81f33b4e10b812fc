//! The immutable catalog index: items plus their pairwise similarity.
//!
//! Built once from the source tables by [`build_catalog_index`], then shared
//! read-only across every query.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{CatalogItem, Recommendation};
use crate::services::normalizer::normalize_records;
use crate::services::recommendations::{rank_similar, TOP_K};
use crate::services::similarity::{cosine_similarity_matrix, SimilarityMatrix};
use crate::services::tags::synthesize_tags;
use crate::services::title_search::resolve_title;
use crate::services::vectorizer::CountVectorizer;
use crate::sources::{join_on_title, CatalogSources};

#[derive(Debug)]
pub struct CatalogIndex {
    items: Vec<CatalogItem>,
    similarity: SimilarityMatrix,
    vocabulary_size: usize,
    built_at: DateTime<Utc>,
}

/// Join, normalize, vectorize and score the whole catalog.
///
/// Fails if the join leaves no items; an empty index is never served.
pub fn build_catalog_index(sources: CatalogSources) -> AppResult<CatalogIndex> {
    let started = Instant::now();

    let joined = join_on_title(&sources);
    tracing::info!(
        movies = sources.movies.len(),
        credits = sources.credits.len(),
        joined = joined.len(),
        "Joined catalog sources on title"
    );

    if joined.is_empty() {
        return Err(AppError::CatalogBuild(
            "no titles matched across movies and credits".to_string(),
        ));
    }

    let (items, stats) = normalize_records(joined);
    tracing::info!(
        items = items.len(),
        empty_fields = stats.empty_fields,
        malformed_fields = stats.malformed_fields,
        "Normalized catalog metadata"
    );

    let index = CatalogIndex::from_items(items, &CountVectorizer::default());

    tracing::info!(
        items = index.len(),
        vocabulary_size = index.vocabulary_size(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Catalog index built"
    );

    Ok(index)
}

impl CatalogIndex {
    /// Vectorize and score already-normalized items
    pub fn from_items(items: Vec<CatalogItem>, vectorizer: &CountVectorizer) -> Self {
        let tags: Vec<String> = items.iter().map(synthesize_tags).collect();
        let space = vectorizer.fit_transform(&tags);

        let started = Instant::now();
        let similarity = cosine_similarity_matrix(&space.counts);
        tracing::debug!(
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Computed similarity matrix"
        );

        Self {
            items,
            similarity,
            vocabulary_size: space.vocabulary.len(),
            built_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// First item whose title contains the query, case-insensitively
    pub fn resolve(&self, query: &str) -> Option<usize> {
        resolve_title(&self.items, query)
    }

    /// Top recommendations for an already-resolved item; empty for an index
    /// outside the catalog
    pub fn recommend_for(&self, index: usize) -> Vec<Recommendation> {
        if index >= self.len() {
            return Vec::new();
        }
        rank_similar(&self.similarity, index, TOP_K)
            .into_iter()
            .map(|(other, score)| Recommendation {
                title: self.items[other].title.clone(),
                score,
            })
            .collect()
    }

    /// Resolve the query and rank; empty when the query matches nothing
    pub fn recommend(&self, query: &str) -> Vec<Recommendation> {
        match self.resolve(query) {
            Some(index) => self.recommend_for(index),
            None => Vec::new(),
        }
    }
}
