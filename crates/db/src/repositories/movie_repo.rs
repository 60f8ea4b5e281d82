//! Repository for the `movies` table.

use cinedex_core::movie::NewMovie;
use cinedex_core::query::{MovieQuery, SortField, SortOrder};
use cinedex_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, genre, rating, poster_image, created_at, updated_at";

/// Byte-wise title ordering, independent of the database locale.
const TITLE_KEY: &str = "title COLLATE \"C\"";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewMovie,
        now: Timestamp,
    ) -> Result<MovieRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, genre, rating, poster_image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.rating)
            .bind(&input.poster_image)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every movie matching `filter`, ordered as it requests.
    ///
    /// Substring matching uses `strpos`, which is case-sensitive and treats
    /// `%` and `_` literally.
    pub async fn list(pool: &PgPool, filter: &MovieQuery) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies {} ORDER BY {}",
            where_clause(filter),
            order_by_clause(filter)
        );

        tracing::debug!(sql = %query, "Listing movies");

        let mut q = sqlx::query_as::<_, MovieRow>(&query);

        if let Some(search) = &filter.search {
            q = q.bind(search);
        }
        if let Some(genre) = &filter.genre {
            q = q.bind(genre);
        }

        q.fetch_all(pool).await
    }

    /// Overwrite every mutable column. `created_at` is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewMovie,
        now: Timestamp,
    ) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                genre = $3,
                rating = $4,
                poster_image = $5,
                updated_at = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.rating)
            .bind(&input.poster_image)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a movie by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `WHERE` clause for the filters present in `filter`, or an empty string.
///
/// Placeholders are numbered in the order `search`, `genre`; binds must follow
/// the same order.
fn where_clause(filter: &MovieQuery) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 1;

    if filter.search.is_some() {
        conditions.push(format!("strpos(title, ${param_idx}) > 0"));
        param_idx += 1;
    }
    if filter.genre.is_some() {
        conditions.push(format!(
            "genre IS NOT NULL AND strpos(genre, ${param_idx}) > 0"
        ));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

fn order_by_clause(filter: &MovieQuery) -> String {
    let direction = match filter.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    match filter.sort_by {
        SortField::Title => format!("{TITLE_KEY} {direction}"),
        SortField::Rating => format!("COALESCE(rating, 0) {direction}, {TITLE_KEY} ASC"),
    }
}
