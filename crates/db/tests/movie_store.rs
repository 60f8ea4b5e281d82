//! Integration tests for the PostgreSQL movie store.
//!
//! These need a reachable PostgreSQL server via `DATABASE_URL`; run them with
//! `cargo test -p cinedex-db -- --ignored`.

use chrono::{SubsecRound, Utc};
use cinedex_core::movie::NewMovie;
use cinedex_core::query::MovieQuery;
use cinedex_core::store::MovieStore;
use cinedex_db::PgMovieStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_movie(title: &str, genre: Option<&str>, rating: Option<i32>) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        genre: genre.map(str::to_string),
        rating,
        poster_image: None,
    }
}

async fn seed(store: &PgMovieStore) {
    for (title, genre, rating) in [
        ("War Horse", Some("Drama"), Some(4)),
        ("Star Wars", Some("Sci-Fi"), Some(5)),
        ("Alien", Some("Sci-Fi Horror"), None),
        ("Warrior", None, Some(4)),
        ("Amelie", Some("Comedy"), None),
        ("war games", Some("Thriller"), Some(2)),
        ("100% Wolf", Some("Family"), Some(3)),
    ] {
        store
            .insert(&new_movie(title, genre, rating), Utc::now())
            .await
            .unwrap();
    }
}

async fn titles(store: &PgMovieStore, query: &MovieQuery) -> Vec<String> {
    store
        .list(query)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn insert_then_find_round_trips(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    let now = Utc::now().trunc_subsecs(6);

    let created = store
        .insert(&new_movie("Dune", Some("Sci-Fi"), Some(5)), now)
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, now);
    assert_eq!(created.updated_at, now);

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn update_replaces_fields_and_keeps_created_at(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    let created = store
        .insert(&new_movie("Heat", Some("Crime"), Some(4)), Utc::now())
        .await
        .unwrap();

    let later = created.created_at + chrono::Duration::seconds(10);
    let updated = store
        .update(created.id, &new_movie("Heat (1995)", None, None), later)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Heat (1995)");
    assert_eq!(updated.genre, None);
    assert_eq!(updated.rating, None);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, later.trunc_subsecs(6));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn missing_ids_report_absence(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    assert!(store.find_by_id(999).await.unwrap().is_none());
    assert!(store
        .update(999, &new_movie("X", None, None), Utc::now())
        .await
        .unwrap()
        .is_none());
    assert!(!store.delete(999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn delete_is_permanent(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    let created = store
        .insert(&new_movie("Brazil", None, None), Utc::now())
        .await
        .unwrap();

    assert!(store.delete(created.id).await.unwrap());
    assert!(store.find_by_id(created.id).await.unwrap().is_none());
    assert!(!store.delete(created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn out_of_range_rating_violates_check_constraint(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    let result = store
        .insert(&new_movie("Bad", None, Some(9)), Utc::now())
        .await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Listing agrees with the in-memory query semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn list_matches_in_memory_ordering(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    seed(&store).await;

    let everything = store.list(&MovieQuery::default()).await.unwrap();

    for (search, genre, sort_by, sort_order) in [
        (None, None, None, None),
        (None, None, Some("title"), Some("desc")),
        (None, None, Some("rating"), None),
        (None, None, Some("RATING"), Some("DESC")),
        (Some("War"), None, None, None),
        (Some("War"), Some("Sci-Fi"), None, None),
        (None, Some("r"), Some("rating"), Some("desc")),
    ] {
        let query = MovieQuery::from_params(search, genre, sort_by, sort_order);
        let expected: Vec<String> = query
            .apply(everything.clone())
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles(&store, &query).await, expected, "query: {query:?}");
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn search_is_case_sensitive_and_literal(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    seed(&store).await;

    let war = MovieQuery::from_params(Some("War"), None, None, None);
    assert_eq!(
        titles(&store, &war).await,
        vec!["Star Wars", "War Horse", "Warrior"]
    );

    let percent = MovieQuery::from_params(Some("%"), None, None, None);
    assert_eq!(titles(&store, &percent).await, vec!["100% Wolf"]);
}
