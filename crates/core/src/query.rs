//! List-query builder for the movie collection.
//!
//! A [`MovieQuery`] is a plain description of the request (search text, genre
//! filter, sort key, direction). From it the builder derives a list of
//! predicate closures and a single comparator, which [`MovieQuery::apply`]
//! runs once over a candidate set. SQL-backed stores translate the same
//! description into `WHERE`/`ORDER BY` clauses and must agree with `apply`.
//!
//! Matching rules:
//!
//! - Substring matching is case-sensitive and ordinal.
//! - Titles order byte-wise (PostgreSQL `COLLATE "C"`), never by locale.
//! - A `None` rating sorts as `0`, below every valid rating.

use std::cmp::Ordering;

use crate::movie::Movie;

/// Default value of the `sortBy` parameter.
pub const DEFAULT_SORT_BY: &str = "title";

/// Default value of the `sortOrder` parameter.
pub const DEFAULT_SORT_ORDER: &str = "asc";

/// A filter applied to each candidate movie.
pub type MoviePredicate = Box<dyn Fn(&Movie) -> bool + Send + Sync>;

/// Total order over movies for one query.
pub type MovieComparator = Box<dyn Fn(&Movie, &Movie) -> Ordering + Send + Sync>;

/// Primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    /// Rating (missing as 0) with an ascending title tie-break.
    Rating,
}

impl SortField {
    /// Case-insensitive parse. Anything other than `rating` means `Title`.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("rating") {
            Self::Rating
        } else {
            Self::Title
        }
    }
}

/// Direction of the primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse. Anything other than `desc` means `Asc`.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Parameters of a list request after blank filters have been dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    /// Substring the title must contain.
    pub search: Option<String>,
    /// Substring the genre must contain. Movies without a genre never match.
    pub genre: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl MovieQuery {
    /// Build a query from raw request parameters.
    ///
    /// Blank (empty or whitespace-only) `search`/`genre` values are treated as
    /// absent. Non-blank values are kept verbatim, surrounding whitespace
    /// included. Missing `sort_by`/`sort_order` fall back to `title`/`asc`.
    pub fn from_params(
        search: Option<&str>,
        genre: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        Self {
            search: non_blank(search),
            genre: non_blank(genre),
            sort_by: SortField::from_param(sort_by.unwrap_or(DEFAULT_SORT_BY)),
            sort_order: SortOrder::from_param(sort_order.unwrap_or(DEFAULT_SORT_ORDER)),
        }
    }

    /// The filters of this query, to be combined with AND.
    pub fn predicates(&self) -> Vec<MoviePredicate> {
        let mut predicates: Vec<MoviePredicate> = Vec::new();

        if let Some(search) = self.search.clone() {
            predicates.push(Box::new(move |m: &Movie| m.title.contains(search.as_str())));
        }

        if let Some(genre) = self.genre.clone() {
            predicates.push(Box::new(move |m: &Movie| {
                m.genre
                    .as_deref()
                    .is_some_and(|g| g.contains(genre.as_str()))
            }));
        }

        predicates
    }

    /// The ordering of this query.
    ///
    /// The direction only flips the primary key; the title tie-break used by
    /// rating sorts stays ascending.
    pub fn comparator(&self) -> MovieComparator {
        let order = self.sort_order;
        match self.sort_by {
            SortField::Title => Box::new(move |a: &Movie, b: &Movie| {
                order.apply(a.title.as_bytes().cmp(b.title.as_bytes()))
            }),
            SortField::Rating => Box::new(move |a: &Movie, b: &Movie| {
                order
                    .apply(rating_key(a).cmp(&rating_key(b)))
                    .then_with(|| a.title.as_bytes().cmp(b.title.as_bytes()))
            }),
        }
    }

    /// Filter and sort `candidates`. The sort is stable, so equal keys keep
    /// their candidate order.
    pub fn apply(&self, candidates: impl IntoIterator<Item = Movie>) -> Vec<Movie> {
        let predicates = self.predicates();
        let comparator = self.comparator();

        let mut movies: Vec<Movie> = candidates
            .into_iter()
            .filter(|m| predicates.iter().all(|p| p(m)))
            .collect();
        movies.sort_by(|a, b| comparator(a, b));
        movies
    }
}

/// Sort key for ratings: a missing rating counts as 0.
pub fn rating_key(movie: &Movie) -> i32 {
    movie.rating.unwrap_or(0)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn movie(id: i64, title: &str, genre: Option<&str>, rating: Option<i32>) -> Movie {
        let now = Utc::now();
        Movie {
            id,
            title: title.to_string(),
            genre: genre.map(str::to_string),
            rating,
            poster_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "War Horse", Some("Drama"), Some(4)),
            movie(2, "Star Wars", Some("Sci-Fi"), Some(5)),
            movie(3, "Alien", Some("Sci-Fi Horror"), None),
            movie(4, "Warrior", None, Some(4)),
            movie(5, "Amelie", Some("Comedy"), None),
            movie(6, "war games", Some("Thriller"), Some(2)),
        ]
    }

    #[test]
    fn defaults_are_title_ascending_without_filters() {
        let q = MovieQuery::from_params(None, None, None, None);
        assert_eq!(q, MovieQuery::default());
        assert_eq!(
            titles(&q.apply(catalog())),
            vec!["Alien", "Amelie", "Star Wars", "War Horse", "Warrior", "war games"]
        );
    }

    #[test]
    fn blank_filters_are_ignored() {
        let q = MovieQuery::from_params(Some("   "), Some(""), None, None);
        assert_eq!(q.search, None);
        assert_eq!(q.genre, None);
        assert_eq!(q.apply(catalog()).len(), 6);
    }

    #[test]
    fn search_is_a_case_sensitive_substring_match() {
        let q = MovieQuery::from_params(Some("War"), None, None, None);
        assert_eq!(
            titles(&q.apply(catalog())),
            vec!["Star Wars", "War Horse", "Warrior"]
        );
    }

    #[test]
    fn search_and_genre_are_combined_with_and() {
        let q = MovieQuery::from_params(Some("War"), Some("Sci-Fi"), None, None);
        assert_eq!(titles(&q.apply(catalog())), vec!["Star Wars"]);
    }

    #[test]
    fn genre_filter_skips_movies_without_genre() {
        let q = MovieQuery::from_params(None, Some("r"), None, None);
        let result = q.apply(catalog());
        assert!(result.iter().all(|m| m.genre.is_some()));
        assert_eq!(titles(&result), vec!["Alien", "War Horse", "war games"]);
    }

    #[test]
    fn sort_parameters_are_case_insensitive() {
        let q = MovieQuery::from_params(None, None, Some("RaTiNg"), Some("DESC"));
        assert_eq!(q.sort_by, SortField::Rating);
        assert_eq!(q.sort_order, SortOrder::Desc);
    }

    #[test]
    fn unknown_sort_values_fall_back_to_title_ascending() {
        let q = MovieQuery::from_params(None, None, Some("year"), Some("sideways"));
        assert_eq!(q.sort_by, SortField::Title);
        assert_eq!(q.sort_order, SortOrder::Asc);
    }

    #[test]
    fn title_descending_reverses_order() {
        let q = MovieQuery::from_params(None, None, Some("title"), Some("desc"));
        assert_eq!(
            titles(&q.apply(catalog())),
            vec!["war games", "Warrior", "War Horse", "Star Wars", "Amelie", "Alien"]
        );
    }

    #[test]
    fn rating_ascending_puts_unrated_first_with_title_tie_break() {
        let q = MovieQuery::from_params(None, None, Some("rating"), None);
        assert_eq!(
            titles(&q.apply(catalog())),
            vec!["Alien", "Amelie", "war games", "War Horse", "Warrior", "Star Wars"]
        );
    }

    #[test]
    fn rating_descending_keeps_title_tie_break_ascending() {
        let q = MovieQuery::from_params(None, None, Some("rating"), Some("desc"));
        assert_eq!(
            titles(&q.apply(catalog())),
            vec!["Star Wars", "War Horse", "Warrior", "war games", "Alien", "Amelie"]
        );
    }

    #[test]
    fn predicates_list_grows_with_each_filter() {
        assert!(MovieQuery::default().predicates().is_empty());
        let q = MovieQuery::from_params(Some("a"), Some("b"), None, None);
        assert_eq!(q.predicates().len(), 2);
    }
}
