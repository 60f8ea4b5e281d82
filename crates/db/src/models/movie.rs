//! Movie row model.

use cinedex_core::movie::Movie;
use cinedex_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: DbId,
    pub title: String,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub poster_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            genre: row.genre,
            rating: row.rating,
            poster_image: row.poster_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
