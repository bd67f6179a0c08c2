use rayon::prelude::*;

use crate::vectorizer::{compare::{Compare, DefaultCompare}, DocumentTermMatrix};

/// Dense matrix of pairwise cosine similarities.
/// Entry (i, j) compares row i of the left matrix with row j of the right one.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

/// cos(a_i, b_j) for every pair of rows.
/// A zero-norm row scores 0.0 against everything, itself included.
pub fn cosine_similarity(a: &DocumentTermMatrix, b: &DocumentTermMatrix) -> SimilarityMatrix {
    let rows = a.n_rows();
    let cols = b.n_rows();
    let mut values = vec![0.0; rows * cols];
    if cols > 0 {
        // each cell is computed independently, so rows can be filled in parallel
        values
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, out)| {
                let row_a = a.row(i);
                for (j, cell) in out.iter_mut().enumerate() {
                    *cell = <DefaultCompare as Compare<u32>>::cosine_similarity(
                        row_a.raw_iter(),
                        b.row(j).raw_iter(),
                    );
                }
            });
    }
    SimilarityMatrix { rows, cols, values }
}

impl SimilarityMatrix {
    /// All-pairs similarity of one matrix with itself
    pub fn cosine(matrix: &DocumentTermMatrix) -> Self {
        cosine_similarity(matrix, matrix)
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    /// Similarities of row `i` against every column
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }
}
