//! In-process [`MovieStore`] backed by a `BTreeMap`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::movie::{Movie, NewMovie};
use crate::query::MovieQuery;
use crate::store::{MovieStore, StoreError};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<DbId, Movie>,
    last_id: DbId,
}

/// Movie store that keeps every record in memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    inner: RwLock<Inner>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn list(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        let snapshot: Vec<Movie> = self.inner.read().await.rows.values().cloned().collect();
        Ok(query.apply(snapshot))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, movie: &NewMovie, now: Timestamp) -> Result<Movie, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let row = Movie {
            id: inner.last_id,
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            rating: movie.rating,
            poster_image: movie.poster_image.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        movie: &NewMovie,
        now: Timestamp,
    ) -> Result<Option<Movie>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.title = movie.title.clone();
        row.genre = movie.genre.clone();
        row.rating = movie.rating;
        row.poster_image = movie.poster_image.clone();
        row.updated_at = now;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
