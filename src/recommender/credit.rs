use std::collections::{BTreeMap, HashMap, HashSet};

use crate::source::{ActorRow, CrewRow};

/// title id → names, iterated in title id order.
/// `None` is a person credited without a name.
pub type CastMap = BTreeMap<String, Vec<Option<String>>>;

/// title id → names
pub type NameMap = HashMap<String, Vec<String>>;

/// Invert (person name, "tt1,tt2") pairs into title id → person names.
///
/// Names keep the order in which persons are first met. A person listing the
/// same title twice is counted once.
pub fn invert_known_for<'a, I, P>(credits: I) -> CastMap
where
    I: IntoIterator<Item = (P, &'a str)>,
    P: Into<Option<&'a str>>,
{
    let mut cast: CastMap = BTreeMap::new();
    for (name, known_for) in credits {
        let name: Option<&str> = name.into();
        let mut seen: HashSet<&str> = HashSet::new();
        for title_id in known_for.split(',') {
            if !seen.insert(title_id) {
                continue;
            }
            cast.entry(title_id.to_string())
                .or_default()
                .push(name.map(String::from));
        }
    }
    cast
}

/// Cast map straight from actor rows.
/// A missing name stays `None` so sanitation can reject the titles it lands on.
/// Actors with no known-for list credit nothing.
pub fn cast_from_rows(rows: &[ActorRow]) -> CastMap {
    invert_known_for(rows.iter().filter_map(|row| {
        row.known_for_titles
            .as_deref()
            .map(|ids| (row.primary_name.as_deref(), ids))
    }))
}

/// Split a delimited name string on commas. No trimming, no dedup.
pub fn split_names(names: &str) -> Vec<String> {
    names.split(',').map(String::from).collect()
}

/// Director and writer names per title
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrewCredits {
    pub directors: NameMap,
    pub writers: NameMap,
}

impl CrewCredits {
    /// Null strings leave the title out of the map instead of
    /// inserting an empty sequence. Later rows replace earlier ones.
    pub fn from_rows(rows: &[CrewRow]) -> Self {
        let mut credits = CrewCredits::default();
        for row in rows {
            if let Some(names) = &row.director_name {
                credits.directors.insert(row.title_id.clone(), split_names(names));
            }
            if let Some(names) = &row.writer_name {
                credits.writers.insert(row.title_id.clone(), split_names(names));
            }
        }
        credits
    }
}
