use crate::services::vectorizer::TermCountMatrix;

/// Dense, symmetric N×N cosine-similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
}

fn dot(a: &[(u32, u32)], b: &[(u32, u32)]) -> u64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0u64;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Equal => {
                sum += a[i].1 as u64 * b[j].1 as u64;
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    sum
}

/// Cosine similarity between every pair of rows.
///
/// A pair involving a zero vector scores 0, so an all-zero row also has 0 on
/// the diagonal. The upper triangle is computed and mirrored.
pub fn cosine_similarity_matrix(counts: &TermCountMatrix) -> SimilarityMatrix {
    let n = counts.n_rows();
    let norms: Vec<f64> = (0..n)
        .map(|i| (dot(counts.row(i), counts.row(i)) as f64).sqrt())
        .collect();

    let mut values = vec![0.0f32; n * n];
    for i in 0..n {
        if norms[i] == 0.0 {
            continue;
        }
        values[i * n + i] = 1.0;

        for j in (i + 1)..n {
            if norms[j] == 0.0 {
                continue;
            }
            let cosine = dot(counts.row(i), counts.row(j)) as f64 / (norms[i] * norms[j]);
            let score = cosine.min(1.0) as f32;
            values[i * n + j] = score;
            values[j * n + i] = score;
        }
    }

    SimilarityMatrix { n, values }
}
