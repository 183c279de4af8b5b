mod detail;
mod list;
mod projection;
mod state;

pub use detail::DetailController;
pub use list::{FeedController, FeedKind, PREFETCH_DISTANCE};
pub use projection::{SortOption, matches_query, project};
pub use state::ViewState;
