//! Persistence port for movies.
//!
//! The catalog only talks to storage through [`MovieStore`], so the HTTP
//! layer can run against PostgreSQL in production and against
//! [`InMemoryMovieStore`](crate::memory_store::InMemoryMovieStore) in tests.

use std::error::Error as StdError;

use async_trait::async_trait;

use crate::movie::{Movie, NewMovie};
use crate::query::MovieQuery;
use crate::types::{DbId, Timestamp};

/// Failure inside the storage backend (connectivity, constraint violation).
#[derive(Debug, thiserror::Error)]
#[error("Store error: {source}")]
pub struct StoreError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl StoreError {
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }
}

/// Storage operations over the movie collection.
///
/// Each method is a single atomic unit against at most one record; the
/// backend is responsible for id assignment and uniqueness.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Return every movie matching `query`, in the query's order.
    async fn list(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    /// Persist a new movie, stamping both timestamps with `now`.
    async fn insert(&self, movie: &NewMovie, now: Timestamp) -> Result<Movie, StoreError>;

    /// Overwrite every mutable field of `id` and set `updated_at = now`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(
        &self,
        id: DbId,
        movie: &NewMovie,
        now: Timestamp,
    ) -> Result<Option<Movie>, StoreError>;

    /// Permanently remove `id`. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
