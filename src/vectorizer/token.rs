use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a document string is cut into tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPattern {
    /// split on whitespace only; soup tokens are whitespace free so this keeps
    /// every sanitized name intact
    #[default]
    Whitespace,
    /// runs of at least two alphanumeric or `_` characters,
    /// like the classic `\b\w\w+\b` count-vectorizer pattern
    Word,
}

impl TokenPattern {
    /// Tokenize `doc`, borrowing slices from it
    pub fn tokenize<'a>(&self, doc: &'a str) -> Vec<&'a str> {
        match self {
            TokenPattern::Whitespace => doc.split_whitespace().collect(),
            TokenPattern::Word => doc
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .filter(|tok| tok.chars().nth(1).is_some())
                .collect(),
        }
    }
}

/// TokenFrequency
/// Counts token occurrences within one document.
/// Tokens keep the order in which they were first seen.
///
/// # Examples
/// ```
/// use title_recommender::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["tomhanks", "drama", "tomhanks"]);
/// assert_eq!(freq.token_count("tomhanks"), 2);
/// assert_eq!(freq.iter().collect::<Vec<_>>(), vec![("tomhanks", 2), ("drama", 1)]);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
        }
    }

    /// Add a token
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self
    }

    /// Add several tokens
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Occurrences of `token`, 0 if never added
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// (token, count) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}
