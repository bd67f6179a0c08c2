pub mod compare;
pub mod evaluate;
pub mod similarity;
pub mod soup;
pub mod stop_words;
pub mod token;

use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::Serialize;

use crate::utils::math::vector::SpVec;
use crate::vectorizer::{stop_words::StopWords, token::{TokenFrequency, TokenPattern}};

/// Count vectorizer
/// Turns a corpus of documents into a document-term count matrix.
///
/// The vocabulary is built from the corpus itself, stop words removed,
/// and sorted so that columns never depend on hashing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVectorizer {
    /// stop word policy, English by default
    pub stop_words: StopWords,
    /// tokenizer, whitespace by default
    pub token_pattern: TokenPattern,
    /// lower-case documents before tokenizing
    pub lowercase: bool,
}

/// Sorted vocabulary; a term's position is its matrix column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of `term`
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at column `index`
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    /// Terms in column order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}

/// Document-term count matrix, one sparse row per document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTermMatrix {
    rows: Vec<SpVec<u32>>,
    n_terms: usize,
}

impl DocumentTermMatrix {
    /// (documents, terms)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.n_terms)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> &SpVec<u32> {
        &self.rows[index]
    }

    pub fn rows(&self) -> &[SpVec<u32>] {
        &self.rows
    }

    /// Count of term `col` in document `row`
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.rows[row].get(col)
    }

    /// Total number of stored non-zero cells
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|r| r.nnz()).sum()
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    /// English stop words, whitespace tokens, lower-casing on
    pub fn new() -> Self {
        CountVectorizer {
            stop_words: StopWords::English,
            token_pattern: TokenPattern::Whitespace,
            lowercase: true,
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_token_pattern(mut self, token_pattern: TokenPattern) -> Self {
        self.token_pattern = token_pattern;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Build the vocabulary of `docs`
    pub fn fit<S>(&self, docs: &[S]) -> Vocabulary
    where
        S: AsRef<str>,
    {
        let stop = self.stop_words.to_set();
        let mut terms: BTreeSet<Box<str>> = BTreeSet::new();
        for doc in docs {
            let doc = self.prepare(doc.as_ref());
            for tok in self.token_pattern.tokenize(&doc) {
                if !stop.contains(tok) {
                    terms.insert(Box::from(tok));
                }
            }
        }
        Vocabulary {
            terms: terms.into_iter().collect(),
        }
    }

    /// Count the vocabulary terms of each document.
    /// Tokens outside the vocabulary are ignored.
    pub fn transform<S>(&self, vocabulary: &Vocabulary, docs: &[S]) -> DocumentTermMatrix
    where
        S: AsRef<str>,
    {
        let n_terms = vocabulary.len();
        let rows = docs
            .iter()
            .map(|doc| {
                let doc = self.prepare(doc.as_ref());
                let mut freq = TokenFrequency::new();
                freq.add_tokens(&self.token_pattern.tokenize(&doc));
                let pairs = freq
                    .iter()
                    .filter_map(|(tok, count)| vocabulary.index_of(tok).map(|col| (col, count)))
                    .collect();
                SpVec::from_pairs(n_terms, pairs)
            })
            .collect();
        DocumentTermMatrix { rows, n_terms }
    }

    /// `fit` then `transform` on the same corpus
    pub fn fit_transform<S>(&self, docs: &[S]) -> (Vocabulary, DocumentTermMatrix)
    where
        S: AsRef<str>,
    {
        let vocabulary = self.fit(docs);
        let matrix = self.transform(&vocabulary, docs);
        tracing::debug!(
            docs = docs.len(),
            terms = vocabulary.len(),
            nnz = matrix.nnz(),
            "fitted count vectorizer"
        );
        (vocabulary, matrix)
    }

    fn prepare(&self, doc: &str) -> String {
        if self.lowercase {
            doc.to_lowercase()
        } else {
            doc.to_string()
        }
    }
}
