//! Bag-of-words vectorizer over a bounded vocabulary.
//!
//! Tokenization: lowercase, split on anything that is not alphanumeric, drop
//! tokens shorter than two characters, drop English stop words. The
//! vocabulary keeps the `max_features` most frequent tokens across the whole
//! corpus, ties going to the token seen first; its order is the column order.

use std::collections::HashMap;

use crate::services::stop_words::is_stop_word;

/// Maximum number of distinct terms kept in the vocabulary
pub const MAX_FEATURES: usize = 5000;

const MIN_TOKEN_CHARS: usize = 2;

/// Term counts per document over a shared vocabulary.
///
/// Rows are stored sparsely as `(column, count)` pairs sorted by column. The
/// logical shape is dense: any missing column has count zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCountMatrix {
    rows: Vec<Vec<(u32, u32)>>,
    n_cols: usize,
}

impl TermCountMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Non-zero entries of a row, sorted by column
    pub fn row(&self, row: usize) -> &[(u32, u32)] {
        &self.rows[row]
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.rows[row]
            .binary_search_by_key(&(col as u32), |&(c, _)| c)
            .map(|pos| self.rows[row][pos].1)
            .unwrap_or(0)
    }

    pub fn to_dense(&self) -> Vec<Vec<u32>> {
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![0; self.n_cols];
                for &(col, count) in row {
                    dense[col as usize] = count;
                }
                dense
            })
            .collect()
    }
}

/// Vocabulary plus one term-count vector per document
#[derive(Debug, Clone)]
pub struct VectorSpace {
    pub vocabulary: Vec<String>,
    pub counts: TermCountMatrix,
}

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new(MAX_FEATURES)
    }
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|token| !is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    /// Select the vocabulary from `documents` and count every document over it
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> VectorSpace {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        let vocabulary = self.select_vocabulary(&tokenized);
        let columns: HashMap<&str, u32> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.as_str(), col as u32))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<u32, u32> = HashMap::new();
                for token in tokens {
                    if let Some(&col) = columns.get(token.as_str()) {
                        *counts.entry(col).or_insert(0) += 1;
                    }
                }
                let mut row: Vec<(u32, u32)> = counts.into_iter().collect();
                row.sort_unstable_by_key(|&(col, _)| col);
                row
            })
            .collect();

        VectorSpace {
            counts: TermCountMatrix {
                rows,
                n_cols: vocabulary.len(),
            },
            vocabulary,
        }
    }

    fn select_vocabulary(&self, tokenized: &[Vec<String>]) -> Vec<String> {
        // token -> (corpus frequency, first-seen position)
        let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
        for token in tokenized.iter().flatten() {
            let next_position = stats.len();
            stats.entry(token.as_str()).or_insert((0, next_position)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .map(|(token, (count, first_seen))| (token, count, first_seen))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.max_features)
            .map(|(token, _, _)| token.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_contract() {
        let vectorizer = CountVectorizer::default();
        assert_eq!(
            vectorizer.tokenize("The ALIEN-invasion of Earth, in 2154! A x"),
            vec!["alien", "invasion", "earth", "2154"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_underscore_and_apostrophe() {
        let vectorizer = CountVectorizer::default();
        assert_eq!(
            vectorizer.tokenize("sci_fi won't"),
            vec!["sci", "fi", "won"]
        );
    }

    #[test]
    fn test_tokenize_all_stop_words() {
        let vectorizer = CountVectorizer::default();
        assert!(vectorizer.tokenize("the and of a I").is_empty());
    }

    #[test]
    fn test_vocabulary_ordered_by_frequency_then_first_seen() {
        let vectorizer = CountVectorizer::default();
        let space = vectorizer.fit_transform(&["space alien war", "alien mission war alien"]);
        assert_eq!(space.vocabulary, vec!["alien", "war", "space", "mission"]);
        assert_eq!(space.counts.to_dense(), vec![vec![1, 1, 1, 0], vec![2, 1, 0, 1]]);
    }

    #[test]
    fn test_vocabulary_cap_drops_out_of_vocabulary_tokens() {
        let vectorizer = CountVectorizer::new(2);
        let space = vectorizer.fit_transform(&["robot robot laser", "laser ninja robot"]);
        assert_eq!(space.vocabulary, vec!["robot", "laser"]);
        assert_eq!(space.counts.n_cols(), 2);
        assert_eq!(space.counts.get(1, 0), 1);
        assert_eq!(space.counts.get(1, 1), 1);
        assert_eq!(space.counts.row(1).len(), 2);
    }

    #[test]
    fn test_empty_document_has_empty_row() {
        let vectorizer = CountVectorizer::default();
        let space = vectorizer.fit_transform(&["pirate treasure", "", "the of"]);
        assert_eq!(space.counts.n_rows(), 3);
        assert!(space.counts.row(1).is_empty());
        assert!(space.counts.row(2).is_empty());
    }

    #[test]
    fn test_fit_transform_is_deterministic() {
        let vectorizer = CountVectorizer::default();
        let docs = ["dragon castle knight", "knight sword dragon", "castle siege"];
        let a = vectorizer.fit_transform(&docs);
        let b = vectorizer.fit_transform(&docs);
        assert_eq!(a.vocabulary, b.vocabulary);
        assert_eq!(a.counts, b.counts);
    }
}
