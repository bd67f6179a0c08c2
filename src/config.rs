use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;
use crate::recommender::RecommenderOptions;
use crate::vectorizer::{stop_words::StopWords, token::TokenPattern, CountVectorizer};

/// Environment prefix of every setting
pub const ENV_PREFIX: &str = "RECOMMENDER_";

/// Recommender configuration loaded from `RECOMMENDER_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Title metadata table (csv, or tsv by extension)
    #[serde(default = "default_titles_path")]
    pub titles_path: PathBuf,

    /// Actor credits table
    #[serde(default = "default_actors_path")]
    pub actors_path: PathBuf,

    /// Director/writer credits table
    #[serde(default = "default_crew_path")]
    pub crew_path: PathBuf,

    /// Number of recommendations per query
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// `whitespace` or `word`
    #[serde(default)]
    pub token_pattern: TokenPattern,

    /// `english` or `none`
    #[serde(default)]
    pub stop_words: StopWordSetting,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StopWordSetting {
    #[default]
    English,
    None,
}

fn default_titles_path() -> PathBuf {
    PathBuf::from("data/movie_rating_df.csv")
}

fn default_actors_path() -> PathBuf {
    PathBuf::from("data/actor_name.csv")
}

fn default_crew_path() -> PathBuf {
    PathBuf::from("data/directors_writers.csv")
}

fn default_top_n() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            titles_path: default_titles_path(),
            actors_path: default_actors_path(),
            crew_path: default_crew_path(),
            top_n: default_top_n(),
            token_pattern: TokenPattern::default(),
            stop_words: StopWordSetting::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }

    /// Load configuration from explicit key/value pairs (keys carry the prefix)
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(vars)?)
    }

    /// Pipeline options derived from this configuration
    pub fn options(&self) -> RecommenderOptions {
        let stop_words = match self.stop_words {
            StopWordSetting::English => StopWords::English,
            StopWordSetting::None => StopWords::None,
        };
        RecommenderOptions {
            vectorizer: CountVectorizer::new()
                .with_stop_words(stop_words)
                .with_token_pattern(self.token_pattern),
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.options().vectorizer, CountVectorizer::new());
    }

    #[test]
    fn prefixed_vars_override() {
        let config = Config::from_vars(vec![
            var("RECOMMENDER_TITLES_PATH", "/tmp/title.basics.tsv"),
            var("RECOMMENDER_TOP_N", "5"),
            var("RECOMMENDER_TOKEN_PATTERN", "word"),
            var("RECOMMENDER_STOP_WORDS", "none"),
            var("UNRELATED", "x"),
        ])
        .unwrap();
        assert_eq!(config.titles_path, PathBuf::from("/tmp/title.basics.tsv"));
        let options = config.options();
        assert_eq!(options.top_n, 5);
        assert_eq!(options.vectorizer.token_pattern, TokenPattern::Word);
        assert_eq!(options.vectorizer.stop_words, StopWords::None);
    }

    #[test]
    fn bad_number_is_a_config_error() {
        let err = Config::from_vars(vec![var("RECOMMENDER_TOP_N", "ten")]).unwrap_err();
        assert!(matches!(err, crate::error::RecommenderError::Config(_)));
    }
}
