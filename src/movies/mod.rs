mod feed;
mod poster;
mod provider;
mod types;


pub use feed::{
    DetailController, FeedController, FeedKind, PREFETCH_DISTANCE, SortOption, ViewState,
    matches_query, project,
};
pub use poster::{
    CacheStats, ImageLoader, ImageOrigin, LoadStatus, PosterImage, Surface, is_video_thumbnail,
    render_placeholder, title_hash,
};
pub use provider::{
    API_HOST_HEADER, API_KEY_HEADER, Endpoint, HttpClient, MoviesApi, MoviesService,
    NOW_PLAYING_PAGE_OFFSET, RECENTLY_ADDED_PAGE_OFFSET, REQUEST_TYPE_HEADER, RawResponse,
    ReqwestTransport, TRENDING_PAGE_OFFSET, Transport, UPCOMING_PAGE_OFFSET,
};
pub use types::{Movie, MovieAliases, MovieDetail, MovieImages, MoviesResponse};

/// Movies result type
pub type Result<T> = std::result::Result<T, MoviesError>;

/// Error taxonomy shared by the fetch client and everything above it.
///
/// The `Display` text doubles as the user-facing message carried by
/// [`ViewState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoviesError {
    #[error("Invalid URL")]
    BadUrl,

    #[error("No data received")]
    NoData,

    #[error("Failed to decode data: {0}")]
    Decoding(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for MoviesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding(err.to_string())
    }
}
