//! Core of a movie catalog browser: a fetch client for the movies API that
//! copes with its inconsistent response shapes, a bounded poster cache, and
//! paginated feed controllers publishing [`ViewState`] updates for a UI.

pub mod config;
pub mod movies;

pub use config::{ApiConfig, AppConfig, ConfigError, DetailConfig, ImageConfig};
pub use movies::{
    DetailController, FeedController, FeedKind, ImageLoader, Movie, MovieDetail, MoviesApi,
    MoviesError, MoviesService, Result, SortOption, Surface, ViewState,
};

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Meant for binaries; calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
