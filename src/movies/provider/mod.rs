mod api;
mod endpoint;
mod http;
mod traits;
mod transport;

pub use api::MoviesApi;
pub use endpoint::{
    Endpoint, NOW_PLAYING_PAGE_OFFSET, RECENTLY_ADDED_PAGE_OFFSET, TRENDING_PAGE_OFFSET,
    UPCOMING_PAGE_OFFSET,
};
pub use http::{API_HOST_HEADER, API_KEY_HEADER, HttpClient, REQUEST_TYPE_HEADER};
pub use traits::MoviesService;
pub use transport::{RawResponse, ReqwestTransport, Transport};
