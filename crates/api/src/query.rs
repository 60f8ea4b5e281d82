//! Query parameter types for API handlers.

use cinedex_core::query::MovieQuery;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for `GET /movies`
/// (`?search=&genre=&sortBy=title|rating&sortOrder=asc|desc`).
///
/// PascalCase keys (`SortBy`, ...) are accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMoviesParams {
    #[serde(alias = "Search")]
    pub search: Option<String>,
    #[serde(alias = "Genre")]
    pub genre: Option<String>,
    #[serde(alias = "SortBy")]
    pub sort_by: Option<String>,
    #[serde(alias = "SortOrder")]
    pub sort_order: Option<String>,
}

impl ListMoviesParams {
    /// Build the list query, rejecting filter text PostgreSQL cannot compare.
    pub fn to_query(&self) -> Result<MovieQuery, AppError> {
        for (name, value) in [("search", &self.search), ("genre", &self.genre)] {
            if value.as_deref().is_some_and(|v| v.contains('\0')) {
                return Err(AppError::BadRequest(format!(
                    "{name} must not contain NUL characters"
                )));
            }
        }

        Ok(MovieQuery::from_params(
            self.search.as_deref(),
            self.genre.as_deref(),
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
        ))
    }
}
