/// Structure to store ranked results
#[derive(Debug, Clone, PartialEq)]
pub struct Hits<K> {
    /// (key, score)
    pub list: Vec<(K, f64)>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance
    pub fn new(vec: Vec<(K, f64)>) -> Self {
        Hits { list: vec }
    }

    /// Sort results by descending score.
    /// The sort is stable: equal scores keep their incoming order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|(_, s)| !s.is_nan());
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    /// Drop every hit matching `pred`
    pub fn exclude<F>(&mut self, mut pred: F) -> &mut Self
    where
        F: FnMut(&K) -> bool,
    {
        self.list.retain(|(k, _)| !pred(k));
        self
    }

    /// Keep the first `n` hits
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }
}

impl Hits<usize> {
    /// Pair every score with its position, e.g. one row of a similarity matrix
    pub fn from_scores(scores: &[f64]) -> Self {
        Hits::new(scores.iter().copied().enumerate().collect())
    }
}
