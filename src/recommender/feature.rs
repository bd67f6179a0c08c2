use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::recommender::credit::{split_names, CastMap, CrewCredits};
use crate::source::TitleRow;

/// Placeholder for a missing genre, director or writer
pub const UNKNOWN: &str = "Unknown";

/// A row of the joined base table: full display metadata of one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub title_id: String,
    pub title: String,
    pub title_type: String,
    pub start_year: Option<u32>,
    pub duration: Option<u32>,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub votes: Option<u32>,
    /// `None` for a credited person with no name
    pub cast: Vec<Option<String>>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
}

/// Join cast, title metadata and crew into the base table.
///
/// - inner join on cast: titles nobody is credited for are dropped
/// - a null genre string becomes `"Unknown"` before splitting
/// - a title absent from the crew maps gets `["Unknown"]`
///
/// Rows follow the cast map order (ascending title id).
pub fn build_base_table(titles: &[TitleRow], cast: &CastMap, crew: &CrewCredits) -> Vec<TitleRecord> {
    let by_id: HashMap<&str, &TitleRow> = titles
        .iter()
        .map(|row| (row.title_id.as_str(), row))
        .collect();
    let unknown = || vec![UNKNOWN.to_string()];

    let base: Vec<TitleRecord> = cast
        .iter()
        .filter_map(|(title_id, names)| {
            let row = by_id.get(title_id.as_str())?;
            Some(TitleRecord {
                title_id: title_id.clone(),
                title: row.primary_title.clone(),
                title_type: row.title_type.clone().unwrap_or_default(),
                start_year: row.start_year,
                duration: row.runtime_minutes,
                genres: split_names(row.genres.as_deref().unwrap_or(UNKNOWN)),
                rating: row.average_rating,
                votes: row.num_votes,
                cast: names.clone(),
                directors: crew.directors.get(title_id).cloned().unwrap_or_else(unknown),
                writers: crew.writers.get(title_id).cloned().unwrap_or_else(unknown),
            })
        })
        .collect();

    info!(
        titles = titles.len(),
        cast_titles = cast.len(),
        joined = base.len(),
        "built base table"
    );
    base
}
