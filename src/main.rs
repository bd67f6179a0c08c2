use std::{io::{self, BufRead, Write}, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use title_recommender::{
    config::StopWordSetting, Config, ContentRecommender, RecommenderError, SourceTables, TokenPattern,
};

/// Recommend titles similar to a given one from cast, genre, director and writer metadata
#[derive(Debug, Parser)]
#[command(name = "title-recommender", version)]
struct Cli {
    /// Title metadata table (overrides RECOMMENDER_TITLES_PATH)
    #[arg(long)]
    titles: Option<PathBuf>,

    /// Actor credits table (overrides RECOMMENDER_ACTORS_PATH)
    #[arg(long)]
    actors: Option<PathBuf>,

    /// Director/writer credits table (overrides RECOMMENDER_CREW_PATH)
    #[arg(long)]
    crew: Option<PathBuf>,

    /// Number of recommendations per query
    #[arg(long)]
    top_n: Option<usize>,

    /// Tokenize soups on word characters instead of whitespace
    #[arg(long)]
    word_tokens: bool,

    /// Keep English stop words in the vocabulary
    #[arg(long)]
    no_stop_words: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Title to query; without it an interactive prompt starts
    query: Option<String>,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(p) = &self.titles { config.titles_path = p.clone(); }
        if let Some(p) = &self.actors { config.actors_path = p.clone(); }
        if let Some(p) = &self.crew { config.crew_path = p.clone(); }
        if let Some(n) = self.top_n { config.top_n = n; }
        if self.word_tokens { config.token_pattern = TokenPattern::Word; }
        if self.no_stop_words { config.stop_words = StopWordSetting::None; }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("title_recommender=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env().context("failed to load config")?);

    let load_start = Instant::now();
    let tables = SourceTables::load(&config)?;
    let recommender = ContentRecommender::build(&tables, &config.options());
    info!(
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        titles = recommender.len(),
        "index built"
    );
    if recommender.is_empty() {
        warn!("no title survived the joins, every query will miss");
    }

    match &cli.query {
        Some(title) => run_single_query(&recommender, title, cli.json)?,
        None => run_interactive(&recommender, cli.json)?,
    }
    Ok(())
}

fn run_single_query(recommender: &ContentRecommender, title: &str, json: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    print_recommendations(&mut stdout, recommender, title.trim(), json)
        .with_context(|| format!("query failed: {title}"))
}

fn run_interactive(recommender: &ContentRecommender, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "Title> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            info!("bye");
            break;
        }
        match print_recommendations(&mut stdout, recommender, trimmed, json) {
            Ok(()) => {}
            Err(err) => match err.downcast_ref::<RecommenderError>() {
                Some(RecommenderError::NotFound(_)) => writeln!(stdout, "(not found: {trimmed})")?,
                _ => return Err(err),
            },
        }
    }
    Ok(())
}

fn print_recommendations<W: Write>(
    out: &mut W,
    recommender: &ContentRecommender,
    title: &str,
    json: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let hits = recommender.recommend_scored(title)?;
    tracing::debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, hits = hits.len(), "query");

    if json {
        serde_json::to_writer_pretty(&mut *out, &hits)?;
        writeln!(out)?;
        return Ok(());
    }
    if hits.is_empty() {
        warn!(title, "no other titles in the index");
    }
    for hit in &hits {
        let rec = hit.record;
        writeln!(
            out,
            "{:.4}\t{} ({}) [{}] {}min rating={} votes={}\n\tgenres: {}\n\tcast: {}\n\tdirectors: {}\n\twriters: {}",
            hit.score,
            rec.title,
            rec.start_year.map_or_else(|| "?".to_string(), |y| y.to_string()),
            rec.title_type,
            rec.duration.map_or_else(|| "?".to_string(), |d| d.to_string()),
            rec.rating.map_or_else(|| "?".to_string(), |r| format!("{r:.1}")),
            rec.votes.map_or_else(|| "?".to_string(), |v| v.to_string()),
            rec.genres.join(", "),
            rec.cast
                .iter()
                .map(|name| name.as_deref().unwrap_or("?"))
                .collect::<Vec<_>>()
                .join(", "),
            rec.directors.join(", "),
            rec.writers.join(", "),
        )?;
    }
    Ok(())
}
