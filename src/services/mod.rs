pub mod catalog;
pub mod literal;
pub mod normalizer;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod stop_words;
pub mod tags;
pub mod title_search;
pub mod vectorizer;

pub use catalog::{build_catalog_index, CatalogIndex};
