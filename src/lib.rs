//! This crate is a content based title recommender.
//! Titles are described by a "soup" of cast, genre, director and writer
//! tokens, vectorized into term counts and compared by cosine similarity.

pub mod config;
pub mod error;
pub mod recommender;
pub mod source;
pub mod utils;
pub mod vectorizer;

/// Content Recommender
/// The top-level struct of this crate.
/// It joins the three source tables, builds one soup per title, vectorizes
/// the soups and answers "titles like this one" queries.
///
/// Internally, it holds:
/// - The joined base table (full display metadata)
/// - The sanitized feature records and the records skipped on the way
/// - The vocabulary and the document-term count matrix
/// - The all-pairs cosine similarity matrix
/// - A title → row index (last write wins on duplicate titles)
///
/// Everything is built once; lookups only read, so a shared reference can
/// serve concurrent callers.
pub use recommender::{ContentRecommender, Recommendation, RecommenderOptions};

/// Title Record
/// One row of the joined base table, as returned by recommendations.
pub use recommender::feature::TitleRecord;

/// Count Vectorizer
/// Builds a sorted, stop-word filtered vocabulary from a corpus and counts
/// term occurrences per document.
pub use vectorizer::{CountVectorizer, DocumentTermMatrix, Vocabulary};

/// Similarity
/// Pairwise cosine similarity between the rows of two count matrices.
pub use vectorizer::similarity::{cosine_similarity, SimilarityMatrix};

/// Soup building
/// - `sanitize`: lower-case and strip whitespace from every value, reject missing ones
/// - `make_soup`: concatenate cast, genres, directors and writers
pub use vectorizer::soup::{make_soup, sanitize, FeatureField, FeatureRecord, RawValue, SoupOutcome};

/// Token Frequency structure
/// Counts token occurrences within a document.
pub use vectorizer::token::{TokenFrequency, TokenPattern};

/// Stop word policies
pub use vectorizer::stop_words::{StopWords, ENGLISH_STOP_WORDS};

/// Search Hits
/// Ranked (key, score) list with stable descending sort.
pub use vectorizer::evaluate::scoring::Hits;

pub use config::Config;
pub use error::{MalformedToken, RecommenderError, Result};
pub use source::SourceTables;
