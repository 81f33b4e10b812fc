use crate::models::CatalogItem;

/// Builds the tag text for an item: overview, genres, keywords, cast and
/// director, space-separated in that order.
///
/// The vectorizer is order-insensitive, but the layout is fixed so the same
/// catalog always produces byte-identical tags.
pub fn synthesize_tags(item: &CatalogItem) -> String {
    [
        item.overview.clone(),
        item.genres.join(" "),
        item.keywords.join(" "),
        item.cast.join(" "),
        item.director.clone(),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_tags_fixed_order() {
        let item = CatalogItem {
            title: "Avatar".to_string(),
            overview: "A marine on an alien planet.".to_string(),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            keywords: vec!["culture clash".to_string(), "future".to_string()],
            cast: vec!["Sam Worthington".to_string(), "Zoe Saldana".to_string()],
            director: "James Cameron".to_string(),
        };

        assert_eq!(
            synthesize_tags(&item),
            "A marine on an alien planet. Action Adventure culture clash future Sam Worthington Zoe Saldana James Cameron"
        );
    }

    #[test]
    fn test_synthesize_tags_keeps_separators_for_empty_fields() {
        let item = CatalogItem::new("Untitled", "");
        assert_eq!(synthesize_tags(&item), "    ");
    }

    #[test]
    fn test_synthesize_tags_does_not_lowercase() {
        let mut item = CatalogItem::new("X", "Space");
        item.director = "Ridley Scott".to_string();
        assert_eq!(synthesize_tags(&item), "Space    Ridley Scott");
    }
}
