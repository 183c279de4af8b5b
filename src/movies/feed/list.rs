use super::projection::{SortOption, project};
use super::state::ViewState;
use crate::movies::{Result, provider::MoviesService, types::Movie};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Items from the end of the projection at which the next page is requested
pub const PREFETCH_DISTANCE: usize = 5;

/// Which paginated list a controller walks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Trending,
    NowPlaying,
    Upcoming,
    RecentlyAdded,
    ByTitle(String),
}

impl FeedKind {
    async fn fetch(&self, service: &dyn MoviesService, page: u32) -> Result<Vec<Movie>> {
        match self {
            Self::Trending => service.get_trending(page).await,
            Self::NowPlaying => service.get_now_playing(page).await,
            Self::Upcoming => service.get_upcoming(page).await,
            Self::RecentlyAdded => service.get_recently_added(page).await,
            Self::ByTitle(title) => service.get_movies_by_title(title, page).await,
        }
    }
}

#[derive(Debug)]
struct PageState {
    items: Vec<Movie>,
    projection: Vec<Movie>,
    page: u32,
    is_loading: bool,
    has_more_pages: bool,
    query: String,
    sort: SortOption,
}

impl PageState {
    fn reproject(&mut self) {
        self.projection = project(&self.items, &self.query, self.sort);
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            projection: Vec::new(),
            page: 1,
            is_loading: false,
            has_more_pages: true,
            query: String::new(),
            sort: SortOption::default(),
        }
    }
}

/// Clears the loading flag however a load ends, including when its future
/// is dropped mid-request.
struct LoadingGuard<'a>(&'a Mutex<PageState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().is_loading = false;
    }
}

/// Incrementally paginated movie list with client-side search and sort.
///
/// At most one page request is in flight at a time. Search and sort only
/// re-project what has already been fetched.
pub struct FeedController {
    kind: FeedKind,
    service: Arc<dyn MoviesService>,
    state: Mutex<PageState>,
    view: watch::Sender<ViewState<Vec<Movie>>>,
}

impl FeedController {
    pub fn new(kind: FeedKind, service: Arc<dyn MoviesService>) -> Self {
        let (view, _) = watch::channel(ViewState::Idle);
        Self {
            kind,
            service,
            state: Mutex::new(PageState::default()),
            view,
        }
    }

    pub fn trending(service: Arc<dyn MoviesService>) -> Self {
        Self::new(FeedKind::Trending, service)
    }

    pub fn now_playing(service: Arc<dyn MoviesService>) -> Self {
        Self::new(FeedKind::NowPlaying, service)
    }

    pub fn upcoming(service: Arc<dyn MoviesService>) -> Self {
        Self::new(FeedKind::Upcoming, service)
    }

    pub fn recently_added(service: Arc<dyn MoviesService>) -> Self {
        Self::new(FeedKind::RecentlyAdded, service)
    }

    pub fn by_title(service: Arc<dyn MoviesService>, title: impl Into<String>) -> Self {
        Self::new(FeedKind::ByTitle(title.into()), service)
    }

    pub fn kind(&self) -> &FeedKind {
        &self.kind
    }

    /// Fetch the next page, or start over from page 1 when `reset` is set.
    ///
    /// Returns immediately while another load is running, and for a plain
    /// load once the feed is exhausted.
    pub async fn load(&self, reset: bool) {
        let page = {
            let mut state = self.state.lock();
            if state.is_loading || !(state.has_more_pages || reset) {
                debug!("{:?}: load skipped (loading: {})", self.kind, state.is_loading);
                return;
            }
            state.is_loading = true;

            if reset {
                state.page = 1;
                state.items.clear();
                state.projection.clear();
                state.has_more_pages = true;
            }
            state.page
        };
        let _loading = LoadingGuard(&self.state);

        self.publish(ViewState::Loading);
        let result = self.kind.fetch(self.service.as_ref(), page).await;

        let next = {
            let mut state = self.state.lock();
            match result {
                Ok(movies) if movies.is_empty() && reset => {
                    state.has_more_pages = false;
                    ViewState::Empty
                }
                Ok(movies) if movies.is_empty() => {
                    debug!("{:?}: page {page} empty, end of feed", self.kind);
                    state.has_more_pages = false;
                    ViewState::Content(state.projection.clone())
                }
                Ok(movies) => {
                    debug!("{:?}: page {page} brought {} movies", self.kind, movies.len());
                    state.items.extend(movies);
                    state.has_more_pages = true;
                    state.page = page + 1;
                    state.reproject();
                    ViewState::Content(state.projection.clone())
                }
                Err(e) => {
                    debug!("{:?}: page {page} failed: {e}", self.kind);
                    ViewState::Error(e.to_string())
                }
            }
        };
        self.publish(next);
    }

    /// Filter the accumulated items; an empty query restores them all
    pub fn search(&self, query: &str) {
        let next = {
            let mut state = self.state.lock();
            state.query = query.to_string();
            state.reproject();

            if state.projection.is_empty() && !state.items.is_empty() {
                ViewState::Empty
            } else {
                ViewState::Content(state.projection.clone())
            }
        };
        self.publish(next);
    }

    pub fn sort(&self, option: SortOption) {
        let next = {
            let mut state = self.state.lock();
            state.sort = option;
            state.reproject();
            ViewState::Content(state.projection.clone())
        };
        self.publish(next);
    }

    /// Whether displaying row `index` of the projection should trigger the
    /// next page. Search results are never paginated further.
    pub fn should_load_more(&self, index: usize) -> bool {
        let state = self.state.lock();
        index.saturating_add(PREFETCH_DISTANCE) >= state.projection.len()
            && state.has_more_pages
            && !state.is_loading
            && state.query.is_empty()
    }

    /// Everything fetched so far, in server order
    pub fn items(&self) -> Vec<Movie> {
        self.state.lock().items.clone()
    }

    /// Currently displayed list
    pub fn projection(&self) -> Vec<Movie> {
        self.state.lock().projection.clone()
    }

    /// Next page to request
    pub fn page(&self) -> u32 {
        self.state.lock().page
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn has_more_pages(&self) -> bool {
        self.state.lock().has_more_pages
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    pub fn sort_option(&self) -> SortOption {
        self.state.lock().sort
    }

    pub fn state(&self) -> ViewState<Vec<Movie>> {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<Movie>>> {
        self.view.subscribe()
    }

    fn publish(&self, state: ViewState<Vec<Movie>>) {
        self.view.send_replace(state);
    }
}
