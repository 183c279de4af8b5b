use super::state::ViewState;
use crate::config::DetailConfig;
use crate::movies::{
    provider::MoviesService,
    types::{Movie, MovieDetail},
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Raised re-entrancy flag, lowered on drop
struct Busy<'a>(&'a AtomicBool);

impl<'a> Busy<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Detail screen: one movie, then the movies similar to it.
///
/// The similar-movies request is only issued once the detail has loaded,
/// after a short pause so the two requests do not hit the API back to back.
pub struct DetailController {
    service: Arc<dyn MoviesService>,
    similar_delay: Duration,
    detail: Mutex<Option<MovieDetail>>,
    similar: Mutex<Vec<Movie>>,
    loading_detail: AtomicBool,
    loading_similar: AtomicBool,
    detail_view: watch::Sender<ViewState<MovieDetail>>,
    similar_view: watch::Sender<ViewState<Vec<Movie>>>,
}

impl DetailController {
    pub fn new(service: Arc<dyn MoviesService>, config: &DetailConfig) -> Self {
        let (detail_view, _) = watch::channel(ViewState::Idle);
        let (similar_view, _) = watch::channel(ViewState::Idle);

        Self {
            service,
            similar_delay: config.similar_delay(),
            detail: Mutex::new(None),
            similar: Mutex::new(Vec::new()),
            loading_detail: AtomicBool::new(false),
            loading_similar: AtomicBool::new(false),
            detail_view,
            similar_view,
        }
    }

    #[must_use]
    pub fn with_similar_delay(mut self, delay: Duration) -> Self {
        self.similar_delay = delay;
        self
    }

    /// Load the movie, then its similar movies
    pub async fn load_detail(&self, id: &str) {
        let Some(_busy) = Busy::acquire(&self.loading_detail) else {
            debug!("Detail for {id} already loading");
            return;
        };

        self.detail_view.send_replace(ViewState::Loading);

        match self.service.get_movie(id).await {
            Ok(detail) => {
                *self.detail.lock() = Some(detail.clone());
                self.detail_view.send_replace(ViewState::Content(detail));

                tokio::time::sleep(self.similar_delay).await;
                self.load_similar(id).await;
            }
            Err(e) => {
                debug!("Detail for {id} failed: {e}");
                self.detail_view.send_replace(ViewState::Error(e.to_string()));
            }
        }
    }

    pub async fn load_similar(&self, id: &str) {
        let Some(_busy) = Busy::acquire(&self.loading_similar) else {
            debug!("Similar movies for {id} already loading, skipping");
            return;
        };

        self.similar_view.send_replace(ViewState::Loading);

        let next = match self.service.get_similar(id, 1).await {
            Ok(similar) if similar.is_empty() => {
                self.similar.lock().clear();
                ViewState::Empty
            }
            Ok(similar) => {
                info!("Loaded {} similar movies for {id}", similar.len());
                *self.similar.lock() = similar.clone();
                ViewState::Content(similar)
            }
            Err(e) => ViewState::Error(e.to_string()),
        };
        self.similar_view.send_replace(next);
    }

    pub async fn retry_detail(&self, id: &str) {
        self.load_detail(id).await;
    }

    pub async fn retry_similar(&self, id: &str) {
        self.load_similar(id).await;
    }

    pub fn set_similar_movies(&self, movies: Vec<Movie>) {
        *self.similar.lock() = movies;
    }

    pub fn detail(&self) -> Option<MovieDetail> {
        self.detail.lock().clone()
    }

    pub fn similar_movies(&self) -> Vec<Movie> {
        self.similar.lock().clone()
    }

    pub fn is_loading_detail(&self) -> bool {
        self.loading_detail.load(Ordering::Acquire)
    }

    pub fn is_loading_similar(&self) -> bool {
        self.loading_similar.load(Ordering::Acquire)
    }

    pub fn detail_state(&self) -> ViewState<MovieDetail> {
        self.detail_view.borrow().clone()
    }

    pub fn similar_state(&self) -> ViewState<Vec<Movie>> {
        self.similar_view.borrow().clone()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<ViewState<MovieDetail>> {
        self.detail_view.subscribe()
    }

    pub fn subscribe_similar(&self) -> watch::Receiver<ViewState<Vec<Movie>>> {
        self.similar_view.subscribe()
    }
}
