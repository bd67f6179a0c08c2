use std::fmt;

use serde::Serialize;

use crate::error::MalformedToken;
use crate::recommender::feature::TitleRecord;

/// The four multi-valued fields that feed the soup, in soup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureField {
    Cast,
    Genres,
    Directors,
    Writers,
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeatureField::Cast => "cast",
            FeatureField::Genres => "genres",
            FeatureField::Directors => "directors",
            FeatureField::Writers => "writers",
        })
    }
}

/// Sanitized features of one title plus its soup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub title: String,
    pub cast: Vec<String>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub soup: String,
}

impl FeatureRecord {
    /// Sanitize every field of `record` and build the soup.
    /// Fails on the first value that cannot become a token.
    pub fn from_title(record: &TitleRecord) -> Result<Self, MalformedToken> {
        let mut feature = FeatureRecord {
            title: record.title.clone(),
            cast: sanitize(FeatureField::Cast, &record.cast)?,
            genres: sanitize(FeatureField::Genres, &record.genres)?,
            directors: sanitize(FeatureField::Directors, &record.directors)?,
            writers: sanitize(FeatureField::Writers, &record.writers)?,
            soup: String::new(),
        };
        feature.soup = make_soup(&feature);
        Ok(feature)
    }

    /// Tokens of `field`
    pub fn field(&self, field: FeatureField) -> &[String] {
        match field {
            FeatureField::Cast => &self.cast,
            FeatureField::Genres => &self.genres,
            FeatureField::Directors => &self.directors,
            FeatureField::Writers => &self.writers,
        }
    }
}

/// Per-record result of soup production
#[derive(Debug, Clone, PartialEq)]
pub enum SoupOutcome {
    Ready(FeatureRecord),
    Skipped { title: String, reason: MalformedToken },
}

/// A raw field value that may be missing
pub trait RawValue {
    fn text(&self) -> Option<&str>;
}

impl RawValue for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawValue for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: RawValue + ?Sized> RawValue for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<T: RawValue> RawValue for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(RawValue::text)
    }
}

/// Lower-case every value and strip all whitespace out of it, so
/// "Tom Hanks" becomes the single token "tomhanks".
/// A blank value becomes the empty token.
///
/// # Errors
/// A missing value has no token form and is reported with its field and position.
pub fn sanitize<V>(field: FeatureField, values: &[V]) -> Result<Vec<String>, MalformedToken>
where
    V: RawValue,
{
    values
        .iter()
        .enumerate()
        .map(|(position, value)| {
            value
                .text()
                .map(|text| {
                    text.chars()
                        .filter(|c| !c.is_whitespace())
                        .collect::<String>()
                        .to_lowercase()
                })
                .ok_or(MalformedToken { field, position })
        })
        .collect()
}

/// Space-join the tokens of each field in the order cast, genres,
/// directors, writers. Empty tokens leave no gap in the soup.
pub fn make_soup(record: &FeatureRecord) -> String {
    [
        FeatureField::Cast,
        FeatureField::Genres,
        FeatureField::Directors,
        FeatureField::Writers,
    ]
    .iter()
    .flat_map(|field| record.field(*field))
    .filter(|token| !token.is_empty())
    .map(String::as_str)
    .collect::<Vec<_>>()
    .join(" ")
}

/// Run soup production over the whole base table, one outcome per row
pub fn extract_features(base: &[TitleRecord]) -> Vec<SoupOutcome> {
    base.iter()
        .map(|record| match FeatureRecord::from_title(record) {
            Ok(feature) => SoupOutcome::Ready(feature),
            Err(reason) => {
                tracing::warn!(
                    title_id = %record.title_id,
                    title = %record.title,
                    %reason,
                    "skipping record from soup"
                );
                SoupOutcome::Skipped {
                    title: record.title.clone(),
                    reason,
                }
            }
        })
        .collect()
}
