use crate::services::similarity::SimilarityMatrix;

/// Number of recommendations returned per query
pub const TOP_K: usize = 5;

/// Rank every other item by similarity to `index`.
///
/// Sorted by descending score with ties broken by ascending catalog index, so
/// repeated calls always return the same list. The item itself is excluded.
pub fn rank_similar(similarity: &SimilarityMatrix, index: usize, limit: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = similarity
        .row(index)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(limit);
    scored
}
