//! Movie catalog service: the operations behind the `/movies` endpoints.
//!
//! Every mutation validates its input before touching the store, then checks
//! existence through the store's own return value. Nothing is retried; store
//! failures surface as [`CoreError::Store`].

use std::sync::Arc;

use chrono::{SubsecRound, Utc};

use crate::error::CoreError;
use crate::movie::{Movie, MovieInput};
use crate::query::MovieQuery;
use crate::store::{MovieStore, StoreError};
use crate::types::{DbId, Timestamp};

const ENTITY: &str = "Movie";

/// Entry point for reading and writing movies.
///
/// Cheap to clone; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
}

impl MovieCatalog {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// All movies matching `query`, filtered and ordered by the store.
    pub async fn list(&self, query: &MovieQuery) -> Result<Vec<Movie>, CoreError> {
        Ok(self.store.list(query).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Movie, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Validate `input` and persist it as a new movie.
    pub async fn create(&self, input: MovieInput) -> Result<Movie, CoreError> {
        let movie = input.into_new_movie()?;
        let created = self.store.insert(&movie, now()).await?;
        tracing::info!(movie_id = created.id, title = %created.title, "Movie created");
        Ok(created)
    }

    /// Replace every mutable field of `id` with `input`.
    ///
    /// Validation runs first, so an invalid body for a missing id reports the
    /// validation failure rather than `NotFound`.
    pub async fn update(&self, id: DbId, input: MovieInput) -> Result<Movie, CoreError> {
        let movie = input.into_new_movie()?;
        let updated = self
            .store
            .update(id, &movie, now())
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(movie_id = id, "Movie updated");
        Ok(updated)
    }

    /// Permanently remove `id`.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if self.store.delete(id).await? {
            tracing::info!(movie_id = id, "Movie deleted");
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: ENTITY, id })
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

/// Current time at the precision PostgreSQL `TIMESTAMPTZ` keeps, so the value
/// returned from a write equals the value read back later.
fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}
