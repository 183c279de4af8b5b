use crate::movies::{
    Result,
    types::{Movie, MovieAliases, MovieDetail, MovieImages},
};
use async_trait::async_trait;

/// Core trait for the movie catalog.
///
/// Pages are 1-based from the caller's point of view; feed offsets are
/// applied further down.
#[async_trait]
pub trait MoviesService: Send + Sync {
    async fn get_trending(&self, page: u32) -> Result<Vec<Movie>>;

    async fn get_now_playing(&self, page: u32) -> Result<Vec<Movie>>;

    async fn get_upcoming(&self, page: u32) -> Result<Vec<Movie>>;

    async fn get_movie(&self, id: &str) -> Result<MovieDetail>;

    /// Movies similar to `id`. Degrades to the trending feed rather than
    /// failing when the similar endpoint is unusable.
    async fn get_similar(&self, id: &str, page: u32) -> Result<Vec<Movie>>;

    async fn get_recently_added(&self, page: u32) -> Result<Vec<Movie>>;

    async fn get_movies_by_title(&self, title: &str, page: u32) -> Result<Vec<Movie>>;

    async fn get_movie_images(&self, imdb_id: &str) -> Result<MovieImages>;

    async fn get_movie_aliases(&self, imdb_id: &str) -> Result<MovieAliases>;
}
