//! Readers for the three input tables.
//!
//! Empty fields and the IMDb null marker `\N` load as `None`.

use std::{fs::File, io, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::info;

use crate::config::Config;
use crate::error::{RecommenderError, Result, Table};

const NULL_MARKER: &str = "\\N";

/// One row of the title metadata table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleRow {
    #[serde(rename = "tconst")]
    pub title_id: String,
    #[serde(rename = "titleType", default, deserialize_with = "opt_string")]
    pub title_type: Option<String>,
    #[serde(rename = "primaryTitle")]
    pub primary_title: String,
    #[serde(rename = "startYear", default, deserialize_with = "opt_whole")]
    pub start_year: Option<u32>,
    #[serde(rename = "runtimeMinutes", default, deserialize_with = "opt_whole")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, deserialize_with = "opt_string")]
    pub genres: Option<String>,
    #[serde(rename = "averageRating", default, deserialize_with = "opt_number")]
    pub average_rating: Option<f64>,
    #[serde(rename = "numVotes", default, deserialize_with = "opt_whole")]
    pub num_votes: Option<u32>,
}

/// One row of the actor credits table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorRow {
    #[serde(default)]
    pub nconst: String,
    #[serde(rename = "primaryName", default, deserialize_with = "opt_string")]
    pub primary_name: Option<String>,
    #[serde(rename = "knownForTitles", default, deserialize_with = "opt_string")]
    pub known_for_titles: Option<String>,
}

/// One row of the director/writer credits table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrewRow {
    #[serde(rename = "tconst")]
    pub title_id: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub director_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub writer_name: Option<String>,
}

/// The three raw tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTables {
    pub titles: Vec<TitleRow>,
    pub actors: Vec<ActorRow>,
    pub crew: Vec<CrewRow>,
}

impl SourceTables {
    /// Load the tables named in `config`
    pub fn load(config: &Config) -> Result<Self> {
        let tables = SourceTables {
            titles: load_table(&config.titles_path, Table::Titles)?,
            actors: load_table(&config.actors_path, Table::Actors)?,
            crew: load_table(&config.crew_path, Table::Crew)?,
        };
        info!(
            titles = tables.titles.len(),
            actors = tables.actors.len(),
            crew = tables.crew.len(),
            "loaded source tables"
        );
        Ok(tables)
    }

    /// Read comma-separated tables from arbitrary readers
    pub fn from_readers<T, A, C>(titles: T, actors: A, crew: C) -> Result<Self>
    where
        T: io::Read,
        A: io::Read,
        C: io::Read,
    {
        Ok(SourceTables {
            titles: read_table(titles, b',', Table::Titles)?,
            actors: read_table(actors, b',', Table::Actors)?,
            crew: read_table(crew, b',', Table::Crew)?,
        })
    }
}

/// Deserialize every row of a headed table.
/// Columns not named by `R` are ignored.
pub fn read_table<R, T>(reader: T, delimiter: u8, table: Table) -> Result<Vec<R>>
where
    R: DeserializeOwned,
    T: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<R>, csv::Error>>()
        .map_err(|source| RecommenderError::Load { table, source })
}

/// Open `path` and read it; `.tsv` files are tab separated
pub fn load_table<R>(path: &Path, table: Table) -> Result<Vec<R>>
where
    R: DeserializeOwned,
{
    info!(%table, path = %path.display(), "reading table");
    let file = File::open(path).map_err(|e| RecommenderError::Load {
        table,
        source: csv::Error::from(e),
    })?;
    read_table(file, delimiter_for(path), table)
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

fn opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty() && s != NULL_MARKER))
}

fn opt_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.and_then(|s| s.trim().parse::<f64>().ok()))
}

/// Whole numbers, also accepting float renderings such as "1994.0"
fn opt_whole<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_number(deserializer)?
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}
