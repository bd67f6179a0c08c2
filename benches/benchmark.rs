use criterion::{black_box, criterion_group, criterion_main, Criterion};
use title_recommender::{ContentRecommender, RecommenderOptions, TitleRecord};

const GENRES: [&str; 8] = ["Drama", "Comedy", "Horror", "Action", "Romance", "Sci-Fi", "Crime", "Animation"];

/// Synthetic base table: overlapping casts and crews so rows share tokens
fn synthetic_base(n: usize) -> Vec<TitleRecord> {
    (0..n)
        .map(|i| TitleRecord {
            title_id: format!("tt{i:07}"),
            title: format!("Title {i}"),
            title_type: "movie".to_string(),
            start_year: Some(1950 + (i % 70) as u32),
            duration: Some(80 + (i % 60) as u32),
            genres: vec![GENRES[i % 8].to_string(), GENRES[(i / 8) % 8].to_string()],
            rating: Some((i % 100) as f64 / 10.0),
            votes: Some(i as u32 * 13),
            cast: (0..4).map(|k| Some(format!("Actor {}", (i * 7 + k * 31) % 500))).collect(),
            directors: vec![format!("Director {}", i % 120)],
            writers: vec![format!("Writer {}", i % 200), format!("Writer {}", (i + 3) % 200)],
        })
        .collect()
}

fn build_and_query_benchmark(c: &mut Criterion) {
    let base = synthetic_base(1_000);
    let options = RecommenderOptions::default();

    c.bench_function("build_1000", |b| {
        b.iter(|| ContentRecommender::from_base_table(black_box(base.clone()), &options));
    });

    let recommender = ContentRecommender::from_base_table(base, &options);
    c.bench_function("recommend", |b| {
        b.iter(|| recommender.recommend(black_box("Title 42")).map(|r| r.len()));
    });
}

criterion_group!(benches, build_and_query_benchmark);
criterion_main!(benches);
