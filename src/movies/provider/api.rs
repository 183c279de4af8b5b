use super::{endpoint::Endpoint, http::HttpClient, traits::MoviesService};
use crate::config::ApiConfig;
use crate::movies::{
    Result,
    types::{Movie, MovieAliases, MovieDetail, MovieImages, MoviesResponse},
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// [`MoviesService`] over the upstream REST API
#[derive(Clone)]
pub struct MoviesApi {
    client: HttpClient,
}

impl MoviesApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::from_config(config)?))
    }

    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch a movie list in whichever shape the endpoint answers with.
    ///
    /// The body is decoded as a wrapped response first and, failing that, as
    /// a bare array. When the first request fails before any body arrives the
    /// request is issued a second time and decoded as a bare array.
    async fn fetch_movies(&self, endpoint: &Endpoint) -> Result<Vec<Movie>> {
        match self.client.fetch(endpoint).await {
            Ok(body) => match HttpClient::decode::<MoviesResponse>(&body) {
                Ok(response) => Ok(response.movies),
                Err(e) => {
                    debug!(
                        "{}: wrapped decode failed ({e}), trying bare array",
                        endpoint.request_type()
                    );
                    HttpClient::decode::<Vec<Movie>>(&body)
                }
            },
            Err(e) => {
                debug!("{}: request failed ({e}), retrying once", endpoint.request_type());
                self.client.request::<Vec<Movie>>(endpoint).await
            }
        }
    }
}

#[async_trait]
impl MoviesService for MoviesApi {
    async fn get_trending(&self, page: u32) -> Result<Vec<Movie>> {
        self.fetch_movies(&Endpoint::Trending { page }).await
    }

    async fn get_now_playing(&self, page: u32) -> Result<Vec<Movie>> {
        self.fetch_movies(&Endpoint::NowPlaying { page }).await
    }

    async fn get_upcoming(&self, page: u32) -> Result<Vec<Movie>> {
        self.fetch_movies(&Endpoint::Upcoming { page }).await
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail> {
        self.client
            .request(&Endpoint::Movie { id: id.to_string() })
            .await
    }

    async fn get_similar(&self, id: &str, page: u32) -> Result<Vec<Movie>> {
        let endpoint = Endpoint::Similar {
            id: id.to_string(),
            page,
        };

        match self.fetch_movies(&endpoint).await {
            Ok(movies) => {
                debug!("Similar movies for {id}: {}", movies.len());
                Ok(movies)
            }
            Err(e) => {
                warn!("Similar movies for {id} unavailable ({e}), using trending page {page}");
                let trending = self.get_trending(page).await?;
                info!("Substituted {} trending movies for similar", trending.len());
                Ok(trending)
            }
        }
    }

    async fn get_recently_added(&self, page: u32) -> Result<Vec<Movie>> {
        self.fetch_movies(&Endpoint::RecentlyAdded { page }).await
    }

    async fn get_movies_by_title(&self, title: &str, page: u32) -> Result<Vec<Movie>> {
        self.fetch_movies(&Endpoint::MoviesByTitle {
            title: title.to_string(),
            page,
        })
        .await
    }

    async fn get_movie_images(&self, imdb_id: &str) -> Result<MovieImages> {
        self.client
            .request(&Endpoint::MovieImages {
                imdb_id: imdb_id.to_string(),
            })
            .await
    }

    async fn get_movie_aliases(&self, imdb_id: &str) -> Result<MovieAliases> {
        self.client
            .request(&Endpoint::MovieAliases {
                imdb_id: imdb_id.to_string(),
            })
            .await
    }
}
