//! Poster lookup providers
//!
//! Posters are display-only. A lookup can fail in several distinct ways, each
//! classified by [`PosterLookupError`], but every failure degrades to "no
//! poster" at the boundary and never affects ranking.

use std::sync::Arc;

pub mod omdb;

pub use omdb::OmdbPosterProvider;

/// Why no poster could be produced for a title
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PosterLookupError {
    #[error("no poster available")]
    NotAvailable,

    #[error("poster lookup timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("poster service returned status {0}")]
    Status(u16),

    #[error("malformed poster response: {0}")]
    MalformedResponse(String),
}

/// Trait for poster data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Look up the poster URL for a title. Implementations must bound the
    /// call with a timeout and must not retry.
    async fn lookup_poster(&self, title: &str) -> Result<String, PosterLookupError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Provider used when no poster service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPosterProvider;

#[async_trait::async_trait]
impl PosterProvider for DisabledPosterProvider {
    async fn lookup_poster(&self, _title: &str) -> Result<String, PosterLookupError> {
        Err(PosterLookupError::NotAvailable)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Look up posters for several titles concurrently.
///
/// Output lines up with `titles`. Any failed lookup becomes `None`.
pub async fn fetch_posters(
    provider: Arc<dyn PosterProvider>,
    titles: Vec<String>,
) -> Vec<Option<String>> {
    let mut tasks = Vec::with_capacity(titles.len());

    for title in titles {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            let result = provider.lookup_poster(&title).await;
            (title, result)
        });
        tasks.push(task);
    }

    let mut posters = Vec::with_capacity(tasks.len());
    let mut failures = 0usize;

    for task in tasks {
        let poster = match task.await {
            Ok((_, Ok(url))) => Some(url),
            Ok((_, Err(PosterLookupError::NotAvailable))) => None,
            Ok((title, Err(e))) => {
                failures += 1;
                tracing::warn!(
                    title = %title,
                    provider = provider.name(),
                    error = %e,
                    "Poster lookup failed"
                );
                None
            }
            Err(e) => {
                failures += 1;
                tracing::error!(error = %e, "Poster task join error");
                None
            }
        };
        posters.push(poster);
    }

    if failures > 0 {
        tracing::debug!(
            found = posters.iter().filter(|p| p.is_some()).count(),
            failures,
            "Partial poster lookup failure"
        );
    }

    posters
}
