pub mod credit;
pub mod feature;

use std::time::Instant;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{MalformedToken, RecommenderError, Result};
use crate::recommender::{
    credit::{cast_from_rows, CrewCredits},
    feature::{build_base_table, TitleRecord},
};
use crate::source::SourceTables;
use crate::vectorizer::{
    evaluate::scoring::Hits,
    similarity::SimilarityMatrix,
    soup::{extract_features, FeatureRecord, SoupOutcome},
    CountVectorizer, DocumentTermMatrix, Vocabulary,
};

/// Default number of recommendations per query
pub const DEFAULT_TOP_N: usize = 10;

/// Pipeline knobs
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderOptions {
    pub vectorizer: CountVectorizer,
    pub top_n: usize,
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        RecommenderOptions {
            vectorizer: CountVectorizer::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// A base-table row that never reached the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub base_row: usize,
    pub title: String,
    pub reason: MalformedToken,
}

/// One recommended title with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    /// corpus row of the title
    pub row: usize,
    pub score: f64,
    pub record: &'a TitleRecord,
}

/// Content based recommender.
///
/// Built once from the three source tables, read-only afterwards:
/// - `base`: the joined base table, full metadata
/// - `features`: sanitized features of the rows that made it into the corpus
/// - `matrix` / `similarity`: count vectors and all-pairs cosine, in corpus row order
/// - `indices`: display title → corpus row, last write wins
#[derive(Debug, Clone)]
pub struct ContentRecommender {
    base: Vec<TitleRecord>,
    corpus_rows: Vec<usize>,
    features: Vec<FeatureRecord>,
    skipped: Vec<SkippedRecord>,
    vocabulary: Vocabulary,
    matrix: DocumentTermMatrix,
    similarity: SimilarityMatrix,
    indices: IndexMap<String, usize>,
    top_n: usize,
}

impl ContentRecommender {
    /// Run the whole pipeline over raw tables
    pub fn build(tables: &SourceTables, options: &RecommenderOptions) -> Self {
        let cast = cast_from_rows(&tables.actors);
        let crew = CrewCredits::from_rows(&tables.crew);
        let base = build_base_table(&tables.titles, &cast, &crew);
        Self::from_base_table(base, options)
    }

    /// Run soup, vectorizer and similarity over an already joined base table
    pub fn from_base_table(base: Vec<TitleRecord>, options: &RecommenderOptions) -> Self {
        let start = Instant::now();

        let mut corpus_rows = Vec::with_capacity(base.len());
        let mut features = Vec::with_capacity(base.len());
        let mut skipped = Vec::new();
        for (base_row, outcome) in extract_features(&base).into_iter().enumerate() {
            match outcome {
                SoupOutcome::Ready(feature) => {
                    corpus_rows.push(base_row);
                    features.push(feature);
                }
                SoupOutcome::Skipped { title, reason } => {
                    skipped.push(SkippedRecord { base_row, title, reason });
                }
            }
        }
        if !skipped.is_empty() {
            warn!(skipped = skipped.len(), "records excluded from the corpus");
        }
        let soup_done = Instant::now();

        let soups: Vec<&str> = features.iter().map(|f| f.soup.as_str()).collect();
        let (vocabulary, matrix) = options.vectorizer.fit_transform(&soups);
        let vector_done = Instant::now();

        let similarity = SimilarityMatrix::cosine(&matrix);
        let similarity_done = Instant::now();

        // same title twice: the later row replaces the earlier one
        let mut indices: IndexMap<String, usize> = IndexMap::with_capacity(features.len());
        for (row, feature) in features.iter().enumerate() {
            if let Some(previous) = indices.insert(feature.title.clone(), row) {
                debug!(title = %feature.title, previous, row, "duplicate title, index now points at later row");
            }
        }

        info!(
            base = base.len(),
            corpus = features.len(),
            terms = vocabulary.len(),
            indexed_titles = indices.len(),
            "recommender ready"
        );
        debug!(
            soup_ms = soup_done.duration_since(start).as_secs_f64() * 1000.0,
            vectorize_ms = vector_done.duration_since(soup_done).as_secs_f64() * 1000.0,
            similarity_ms = similarity_done.duration_since(vector_done).as_secs_f64() * 1000.0,
            "build timings"
        );

        ContentRecommender {
            base,
            corpus_rows,
            features,
            skipped,
            vocabulary,
            matrix,
            similarity,
            indices,
            top_n: options.top_n,
        }
    }

    /// Most similar titles to `title` with their scores, best first.
    ///
    /// Ties keep ascending row order. The query row itself is never returned.
    ///
    /// # Errors
    /// `NotFound` if `title` was never indexed.
    pub fn recommend_scored(&self, title: &str) -> Result<Vec<Recommendation<'_>>> {
        let row = self.index_of(title)?;
        let mut hits = Hits::from_scores(self.similarity.row(row));
        hits.sort_by_score_desc()
            .exclude(|other| *other == row)
            .truncate(self.top_n);
        Ok(hits
            .list
            .into_iter()
            .map(|(other, score)| Recommendation {
                row: other,
                score,
                record: &self.base[self.corpus_rows[other]],
            })
            .collect())
    }

    /// Most similar titles to `title`, best first, as base-table records
    pub fn recommend(&self, title: &str) -> Result<Vec<&TitleRecord>> {
        Ok(self
            .recommend_scored(title)?
            .into_iter()
            .map(|rec| rec.record)
            .collect())
    }

    /// Owned copy of `recommend`
    pub fn content_recommender(&self, title: &str) -> Result<Vec<TitleRecord>> {
        Ok(self.recommend(title)?.into_iter().cloned().collect())
    }

    /// Corpus row of `title`
    pub fn index_of(&self, title: &str) -> Result<usize> {
        self.indices
            .get(title)
            .copied()
            .ok_or_else(|| RecommenderError::NotFound(title.to_string()))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.indices.contains_key(title)
    }

    /// Number of titles in the corpus
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn base_table(&self) -> &[TitleRecord] {
        &self.base
    }

    /// Base-table record of corpus row `row`
    pub fn record(&self, row: usize) -> &TitleRecord {
        &self.base[self.corpus_rows[row]]
    }

    pub fn features(&self) -> &[FeatureRecord] {
        &self.features
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &DocumentTermMatrix {
        &self.matrix
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::soup::FeatureField;

    fn record(id: &str, title: &str, cast: &[&str], genres: &[&str], directors: &[&str]) -> TitleRecord {
        let own = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        TitleRecord {
            title_id: id.to_string(),
            title: title.to_string(),
            title_type: "movie".to_string(),
            start_year: Some(1995),
            duration: Some(120),
            genres: own(genres),
            rating: Some(7.0),
            votes: Some(1000),
            cast: cast.iter().map(|s| Some(s.to_string())).collect(),
            directors: own(directors),
            writers: vec!["Unknown".to_string()],
        }
    }

    fn scenario() -> Vec<TitleRecord> {
        vec![
            record("tt1", "Apollo 13", &["Tom Hanks"], &["Drama"], &["Ron Howard"]),
            record("tt2", "Splash", &["Tom Hanks"], &["Drama"], &["Ron Howard"]),
            record("tt3", "Alien", &["Sigourney Weaver"], &["Horror"], &["Ridley Scott"]),
        ]
    }

    #[test]
    fn shared_tokens_rank_above_disjoint_ones() {
        let rec = ContentRecommender::from_base_table(scenario(), &RecommenderOptions::default());
        let hits = rec.recommend_scored("Apollo 13").unwrap();
        assert_eq!(hits[0].record.title, "Splash");
        assert_eq!(hits[1].record.title, "Alien");
        assert!(hits[0].score > hits[1].score);

        let back = rec.recommend("Splash").unwrap();
        assert_eq!(back[0].title, "Apollo 13");
    }

    #[test]
    fn unknown_title_is_not_found() {
        let rec = ContentRecommender::from_base_table(scenario(), &RecommenderOptions::default());
        let err = rec.recommend("Jaws").unwrap_err();
        assert!(matches!(err, RecommenderError::NotFound(t) if t == "Jaws"));
    }

    #[test]
    fn at_most_top_n_distinct_and_never_self() {
        let base: Vec<TitleRecord> = (0..15)
            .map(|i| record(&format!("tt{i:02}"), &format!("Movie {i}"), &["Tom Hanks"], &["Drama"], &["Ron Howard"]))
            .collect();
        let rec = ContentRecommender::from_base_table(base, &RecommenderOptions::default());
        let out = rec.recommend_scored("Movie 0").unwrap();
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|r| r.record.title != "Movie 0"));
        // all tied at 1.0, so ascending row order
        let rows: Vec<usize> = out.iter().map(|r| r.row).collect();
        assert_eq!(rows, (1..=10).collect::<Vec<_>>());
        // querying a later row still excludes only itself
        let out = rec.recommend_scored("Movie 5").unwrap();
        assert!(out.iter().all(|r| r.row != 5));
        assert_eq!(out[0].row, 0);
    }

    #[test]
    fn duplicate_titles_resolve_to_last_row() {
        let mut base = scenario();
        base.push(record("tt4", "Apollo 13", &["Sigourney Weaver"], &["Horror"], &["Ridley Scott"]));
        let rec = ContentRecommender::from_base_table(base, &RecommenderOptions::default());
        assert_eq!(rec.index_of("Apollo 13").unwrap(), 3);
        let out = rec.recommend("Apollo 13").unwrap();
        assert_eq!(out[0].title, "Alien");
    }

    #[test]
    fn malformed_rows_are_skipped_and_rows_stay_aligned() {
        let mut base = scenario();
        let mut broken = record("tt0", "Broken", &["Tom Hanks"], &["Drama"], &["Ron Howard"]);
        broken.cast.push(None);
        base.insert(1, broken);
        let rec = ContentRecommender::from_base_table(base, &RecommenderOptions::default());
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.skipped().len(), 1);
        assert_eq!(rec.skipped()[0].base_row, 1);
        assert_eq!(rec.skipped()[0].reason.field, FeatureField::Cast);
        assert!(!rec.contains("Broken"));
        assert_eq!(rec.record(1).title, "Splash");
        assert_eq!(rec.recommend("Apollo 13").unwrap()[0].title, "Splash");
    }

    #[test]
    fn blank_crew_pieces_keep_the_title() {
        let mut base = scenario();
        base[0].directors = vec!["Ron Howard".to_string(), String::new()];
        base[1].genres = vec![String::new(), "Drama".to_string(), String::new()];
        let rec = ContentRecommender::from_base_table(base, &RecommenderOptions::default());
        assert!(rec.skipped().is_empty());
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.recommend("Apollo 13").unwrap()[0].title, "Splash");
    }

    #[test]
    fn owned_results_carry_full_metadata() {
        let rec = ContentRecommender::from_base_table(scenario(), &RecommenderOptions { top_n: 1, ..Default::default() });
        let out = rec.content_recommender("Alien").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start_year, Some(1995));
        assert_eq!(out[0].cast, vec![Some("Tom Hanks".to_string())]);
        assert_eq!(rec.matrix().n_rows(), rec.similarity().shape().0);
    }
}
