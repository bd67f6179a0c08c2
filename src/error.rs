use std::fmt;

use thiserror::Error;

use crate::vectorizer::soup::FeatureField;

/// Main error type for the recommender
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// The title was never indexed
    #[error("title not found in index: {0}")]
    NotFound(String),

    /// A source table could not be opened or parsed
    #[error("failed to load {table} table: {source}")]
    Load {
        table: Table,
        #[source]
        source: csv::Error,
    },

    /// Environment configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RecommenderError>;

/// The three input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Titles,
    Actors,
    Crew,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Titles => "titles",
            Table::Actors => "actors",
            Table::Crew => "crew",
        })
    }
}

/// A missing value where a soup token was expected.
/// The record carrying it is skipped, the batch goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing {field} value at position {position}")]
pub struct MalformedToken {
    pub field: FeatureField,
    pub position: usize,
}
