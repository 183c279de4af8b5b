use crate::movies::{MoviesError, Result};
use reqwest::{Method, Url};

/// Page shifts per logical feed.
///
/// The upstream API only has one usable paginated list. Its first page is
/// empty, and "now playing"/"upcoming" are simulated by reading further into
/// the same list. These numbers track the upstream page layout and break if
/// it changes.
pub const TRENDING_PAGE_OFFSET: u32 = 1;
pub const NOW_PLAYING_PAGE_OFFSET: u32 = 10;
pub const UPCOMING_PAGE_OFFSET: u32 = 20;
pub const RECENTLY_ADDED_PAGE_OFFSET: u32 = 1;

/// Logical upstream query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Trending { page: u32 },
    NowPlaying { page: u32 },
    Upcoming { page: u32 },
    RecentlyAdded { page: u32 },
    Movie { id: String },
    Similar { id: String, page: u32 },
    MoviesByTitle { title: String, page: u32 },
    MovieImages { imdb_id: String },
    MovieAliases { imdb_id: String },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        Method::GET
    }

    /// Value of the `Type` header selecting the operation server-side
    pub const fn request_type(&self) -> &'static str {
        match self {
            Self::Trending { .. } => "get-trending-movies",
            Self::NowPlaying { .. } => "get-nowplaying-movies",
            Self::Upcoming { .. } => "get-upcoming-movies",
            Self::RecentlyAdded { .. } => "get-recently-added-movies",
            Self::Movie { .. } => "get-movie-details",
            Self::Similar { .. } => "get-similar-movies",
            Self::MoviesByTitle { .. } => "get-movies-by-title",
            Self::MovieImages { .. } => "get-movies-images-by-imdb",
            Self::MovieAliases { .. } => "get-movies-aliases-by-imdb",
        }
    }

    pub const fn page_offset(&self) -> u32 {
        match self {
            Self::Trending { .. } => TRENDING_PAGE_OFFSET,
            Self::NowPlaying { .. } => NOW_PLAYING_PAGE_OFFSET,
            Self::Upcoming { .. } => UPCOMING_PAGE_OFFSET,
            Self::RecentlyAdded { .. } => RECENTLY_ADDED_PAGE_OFFSET,
            _ => 0,
        }
    }

    /// Page number actually sent upstream, if the endpoint is paginated
    pub fn upstream_page(&self) -> Option<u32> {
        let page = match self {
            Self::Trending { page }
            | Self::NowPlaying { page }
            | Self::Upcoming { page }
            | Self::RecentlyAdded { page }
            | Self::Similar { page, .. }
            | Self::MoviesByTitle { page, .. } => *page,
            Self::Movie { .. } | Self::MovieImages { .. } | Self::MovieAliases { .. } => {
                return None;
            }
        };
        Some(page.saturating_add(self.page_offset()))
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        match self {
            Self::Movie { id } | Self::Similar { id, .. } => params.push(("movieid", id.clone())),
            Self::MovieImages { imdb_id } | Self::MovieAliases { imdb_id } => {
                params.push(("movieid", imdb_id.clone()));
            }
            Self::MoviesByTitle { title, .. } => params.push(("title", title.clone())),
            _ => {}
        }
        if let Some(page) = self.upstream_page() {
            params.push(("page", page.to_string()));
        }
        params
    }

    /// Resolve against the API base URL
    pub fn url(&self, base_url: &str) -> Result<Url> {
        Url::parse_with_params(base_url, self.query()).map_err(|_| MoviesError::BadUrl)
    }
}
