//! Movie entity, request body, and the normalization/validation rules that
//! every write goes through.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{CoreError, FieldErrors};
use crate::types::{DbId, Timestamp};

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub poster_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for both create and update.
///
/// Update has full replacement semantics, so the same shape serves both: an
/// omitted optional field clears the stored value.
///
/// Keys are camelCase; the PascalCase spelling is accepted as well. `rating`
/// is read as `i64` so any JSON integer reaches the range check instead of
/// failing to decode.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    #[serde(alias = "Title")]
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 200, message = "title must be between 1 and 200 characters"),
        custom(function = "reject_nul")
    )]
    pub title: Option<String>,
    #[serde(alias = "Genre")]
    #[validate(
        length(max = 100, message = "genre must be at most 100 characters"),
        custom(function = "reject_nul")
    )]
    pub genre: Option<String>,
    #[serde(alias = "Rating")]
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i64>,
    #[serde(alias = "PosterImage")]
    #[validate(custom(function = "reject_nul"))]
    pub poster_image: Option<String>,
}

/// PostgreSQL text cannot hold U+0000.
fn reject_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul_character")
            .with_message(Cow::from("must not contain NUL characters")));
    }
    Ok(())
}

/// A normalized, validated write payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub poster_image: Option<String>,
}

impl MovieInput {
    /// Apply the write-side normalization rules.
    ///
    /// - `title` is trimmed.
    /// - `genre` is trimmed and dropped when blank.
    /// - `poster_image` is dropped when blank but otherwise kept verbatim.
    pub fn normalize(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            genre: self
                .genre
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty()),
            rating: self.rating,
            poster_image: self.poster_image.filter(|p| !p.trim().is_empty()),
        }
    }

    /// Normalize, validate, and convert into a [`NewMovie`].
    ///
    /// All violations are collected before returning so the caller sees every
    /// offending field at once.
    pub fn into_new_movie(self) -> Result<NewMovie, CoreError> {
        let input = self.normalize();
        input
            .validate()
            .map_err(|errs| CoreError::Validation(FieldErrors::from(errs)))?;

        Ok(NewMovie {
            // `required` above guarantees presence.
            title: input.title.unwrap_or_default(),
            genre: input.genre,
            // 1..=5 after validation.
            rating: input.rating.map(|r| r as i32),
            poster_image: input.poster_image,
        })
    }
}
