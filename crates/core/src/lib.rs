//! Domain layer for the cinedex movie catalog.
//!
//! Holds the movie model and its validation rules, the list-query builder,
//! the [`store::MovieStore`] port with an in-memory implementation, and the
//! [`catalog::MovieCatalog`] service that the HTTP layer drives. Nothing in
//! here knows about PostgreSQL or axum.

pub mod catalog;
pub mod error;
pub mod memory_store;
pub mod movie;
pub mod query;
pub mod store;
pub mod types;
