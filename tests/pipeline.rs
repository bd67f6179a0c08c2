use title_recommender::{
    ContentRecommender, FeatureField, RecommenderError, RecommenderOptions, SourceTables,
};

const TITLES: &str = "\
tconst,titleType,primaryTitle,originalTitle,isAdult,startYear,endYear,runtimeMinutes,genres,averageRating,numVotes
tt0109830,movie,Forrest Gump,Forrest Gump,0,1994,\\N,142,\"Comedy,Romance\",8.8,2000000
tt0112384,movie,Apollo 13,Apollo 13,0,1995,\\N,140,\"Adventure,Drama,History\",7.7,300000
tt0088161,movie,Splash,Splash,0,1984,\\N,111,\"Comedy,Fantasy,Romance\",6.4,80000
tt0078748,movie,Alien,Alien,0,1979,\\N,117,\"Horror,Sci-Fi\",8.5,900000
tt0090605,movie,Aliens,Aliens,0,1986,\\N,137,,8.4,700000
tt9999999,movie,Nobody Stars Here,Nobody Stars Here,0,2020,\\N,90,Drama,5.0,10
";

const ACTORS: &str = "\
nconst,primaryName,birthYear,deathYear,primaryProfession,knownForTitles
nm0000158,Tom Hanks,1956,\\N,actor,\"tt0109830,tt0112384,tt0088161\"
nm0000244,Sigourney Weaver,1949,\\N,actress,\"tt0078748,tt0090605\"
nm0000200,Bill Paxton,1955,2017,actor,\"tt0112384,tt0090605\"
nm0000001,Ghost Credit,1900,\\N,actor,tt0000000
";

const CREW: &str = "\
tconst,director_name,writer_name
tt0109830,Robert Zemeckis,\"Winston Groom,Eric Roth\"
tt0112384,Ron Howard,\"William Broyles Jr.,Al Reinert\"
tt0088161,Ron Howard,\"Lowell Ganz,Babaloo Mandel\"
tt0078748,Ridley Scott,\"Dan O'Bannon,Ronald Shusett\"
";

fn tables() -> SourceTables {
    SourceTables::from_readers(TITLES.as_bytes(), ACTORS.as_bytes(), CREW.as_bytes()).unwrap()
}

fn build() -> ContentRecommender {
    ContentRecommender::build(&tables(), &RecommenderOptions::default())
}

#[test]
fn join_drops_titles_without_cast() {
    let rec = build();
    assert_eq!(rec.len(), 5);
    assert!(!rec.contains("Nobody Stars Here"));
    let ids: Vec<&str> = rec.base_table().iter().map(|r| r.title_id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn sentinels_after_sanitation() {
    let rec = build();
    let aliens = rec.features().iter().find(|f| f.title == "Aliens").unwrap();
    assert_eq!(aliens.genres, vec!["unknown"]);
    assert_eq!(aliens.directors, vec!["unknown"]);
    assert_eq!(aliens.writers, vec!["unknown"]);
    assert_eq!(aliens.cast, vec!["sigourneyweaver", "billpaxton"]);
}

#[test]
fn every_token_is_lowercase_without_whitespace() {
    let rec = build();
    for feature in rec.features() {
        for field in [FeatureField::Cast, FeatureField::Genres, FeatureField::Directors, FeatureField::Writers] {
            for tok in feature.field(field) {
                assert!(!tok.chars().any(char::is_whitespace), "{tok:?}");
                assert_eq!(tok, &tok.to_lowercase());
            }
        }
    }
}

#[test]
fn similarity_is_symmetric_with_max_diagonal() {
    let rec = build();
    let sim = rec.similarity();
    let n = rec.len();
    assert_eq!(sim.shape(), (n, n));
    for i in 0..n {
        for j in 0..n {
            assert_eq!(sim.get(i, j), sim.get(j, i));
            assert!(sim.get(i, j) <= sim.get(i, i));
        }
    }
}

#[test]
fn ron_howard_titles_are_neighbours() {
    let rec = build();
    let out = rec.recommend("Apollo 13").unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(out[0].title, "Splash");
    assert!(out.iter().all(|r| r.title != "Apollo 13"));
    assert_eq!(out[0].rating, Some(6.4));
    assert_eq!(out[0].directors, vec!["Ron Howard"]);
}

#[test]
fn rebuild_is_identical() {
    let a = build();
    let b = build();
    assert_eq!(a.vocabulary(), b.vocabulary());
    assert_eq!(a.matrix(), b.matrix());
    assert_eq!(a.content_recommender("Alien").unwrap(), b.content_recommender("Alien").unwrap());
}

#[test]
fn unknown_query_is_an_error() {
    let rec = build();
    assert!(matches!(rec.recommend("The Lion King"), Err(RecommenderError::NotFound(_))));
}

#[test]
fn stray_commas_in_crew_keep_titles() {
    let titles = "\
tconst,titleType,primaryTitle,originalTitle,isAdult,startYear,endYear,runtimeMinutes,genres,averageRating,numVotes
tt1,movie,Apollo 13,Apollo 13,0,1995,\\N,140,\"Drama,\",7.7,300000
tt2,movie,Splash,Splash,0,1984,\\N,111,Comedy,6.4,80000
";
    let actors = "\
nconst,primaryName,knownForTitles
nm1,Tom Hanks,\"tt1,tt2\"
";
    let crew = "\
tconst,director_name,writer_name
tt1,\"Ron Howard,\",Al Reinert
tt2,Ron Howard,\"Lowell Ganz,,Babaloo Mandel\"
";
    let tables = SourceTables::from_readers(titles.as_bytes(), actors.as_bytes(), crew.as_bytes()).unwrap();
    let rec = ContentRecommender::build(&tables, &RecommenderOptions::default());

    assert!(rec.skipped().is_empty());
    assert_eq!(rec.len(), 2);
    assert!(rec.contains("Apollo 13"));
    let apollo = rec.features().iter().find(|f| f.title == "Apollo 13").unwrap();
    assert_eq!(apollo.directors, vec!["ronhoward", ""]);
    assert_eq!(apollo.soup, "tomhanks drama ronhoward alreinert");

    let out = rec.recommend("Splash").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Apollo 13");
}

#[test]
fn nameless_actor_skips_only_its_titles() {
    let actors = format!("{ACTORS}nm0000002,,1900,\\N,actor,tt0078748\n");
    let tables = SourceTables::from_readers(TITLES.as_bytes(), actors.as_bytes(), CREW.as_bytes()).unwrap();
    let rec = ContentRecommender::build(&tables, &RecommenderOptions::default());

    assert_eq!(rec.skipped().len(), 1);
    assert_eq!(rec.skipped()[0].title, "Alien");
    assert_eq!(rec.skipped()[0].reason.field, FeatureField::Cast);
    assert!(!rec.contains("Alien"));
    assert_eq!(rec.len(), 4);
}
