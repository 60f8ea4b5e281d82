//! [`MovieStore`] implementation over PostgreSQL.

use async_trait::async_trait;
use cinedex_core::movie::{Movie, NewMovie};
use cinedex_core::query::MovieQuery;
use cinedex_core::store::{MovieStore, StoreError};
use cinedex_core::types::{DbId, Timestamp};

use crate::repositories::MovieRepo;
use crate::DbPool;

#[derive(Clone, Debug)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        let rows = MovieRepo::list(&self.pool, query)
            .await
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        let row = MovieRepo::find_by_id(&self.pool, id)
            .await
            .map_err(StoreError::new)?;
        Ok(row.map(Movie::from))
    }

    async fn insert(&self, movie: &NewMovie, now: Timestamp) -> Result<Movie, StoreError> {
        MovieRepo::create(&self.pool, movie, now)
            .await
            .map(Movie::from)
            .map_err(StoreError::new)
    }

    async fn update(
        &self,
        id: DbId,
        movie: &NewMovie,
        now: Timestamp,
    ) -> Result<Option<Movie>, StoreError> {
        let row = MovieRepo::update(&self.pool, id, movie, now)
            .await
            .map_err(StoreError::new)?;
        Ok(row.map(Movie::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        MovieRepo::delete(&self.pool, id)
            .await
            .map_err(StoreError::new)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::new)
    }
}
