//! Handlers for the `/movies` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use cinedex_core::movie::{Movie, MovieInput};
use cinedex_core::types::DbId;

use crate::error::AppResult;
use crate::query::ListMoviesParams;
use crate::state::AppState;

/// GET /movies
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListMoviesParams>, QueryRejection>,
) -> AppResult<Json<Vec<Movie>>> {
    let Query(params) = params?;
    let query = params.to_query()?;
    tracing::debug!(?query, "Listing movies");
    let movies = state.movies.list(&query).await?;
    Ok(Json(movies))
}

/// GET /movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    let movie = state.movies.get_by_id(id).await?;
    Ok(Json(movie))
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    input: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Movie>)> {
    let Json(input) = input?;
    let movie = state.movies.create(input).await?;
    let location = format!("/movies/{}", movie.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(movie)))
}

/// PUT /movies/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    input: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    let Json(input) = input?;
    let movie = state.movies.update(id, input).await?;
    Ok(Json(movie))
}

/// DELETE /movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
