use crate::movies::types::Movie;
use std::cmp::Reverse;

/// Client-side ordering of an accumulated feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Server order
    #[default]
    Unsorted,
    /// Highest rating first; unrated counts as 0
    RatingDesc,
    /// Newest first; unknown year counts as 0
    YearDesc,
}

impl SortOption {
    pub const ALL: [Self; 3] = [Self::Unsorted, Self::RatingDesc, Self::YearDesc];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Unsorted => "Default",
            Self::RatingDesc => "By rating",
            Self::YearDesc => "By year",
        }
    }

    /// Reorder in place. Both comparisons use the stable sort, so equal keys
    /// keep their insertion order.
    pub fn apply(self, movies: &mut [Movie]) {
        match self {
            Self::Unsorted => {}
            Self::RatingDesc => movies.sort_by(|a, b| {
                let (a, b) = (a.rating().unwrap_or(0.0), b.rating().unwrap_or(0.0));
                b.total_cmp(&a)
            }),
            Self::YearDesc => movies.sort_by_key(|movie| Reverse(year_of(movie))),
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

fn year_of(movie: &Movie) -> i32 {
    movie
        .year()
        .and_then(|year| year.trim().parse().ok())
        .unwrap_or(0)
}

/// Title matches case-insensitively, year matches as a plain substring
pub fn matches_query(movie: &Movie, query: &str) -> bool {
    movie
        .title()
        .to_lowercase()
        .contains(&query.to_lowercase())
        || movie.year().is_some_and(|year| year.contains(query))
}

/// Filter by `query`, then order by `sort`
pub fn project(items: &[Movie], query: &str, sort: SortOption) -> Vec<Movie> {
    let mut projected: Vec<Movie> = if query.is_empty() {
        items.to_vec()
    } else {
        items
            .iter()
            .filter(|movie| matches_query(movie, query))
            .cloned()
            .collect()
    };
    sort.apply(&mut projected);
    projected
}
