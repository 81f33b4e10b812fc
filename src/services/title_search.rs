use crate::models::CatalogItem;

/// Resolve a free-text query to the first catalog item whose title contains it.
///
/// Matching is a case-insensitive substring test in catalog order; the first
/// hit wins even if a closer title appears later. A blank query matches
/// nothing and performs no scan.
pub fn resolve_title(items: &[CatalogItem], query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    items
        .iter()
        .position(|item| item.title.to_lowercase().contains(&query))
}
