mod loader;
mod placeholder;
mod process;
mod surface;

pub use loader::{CacheStats, ImageLoader, LoadStatus};
pub use placeholder::{render as render_placeholder, title_hash};
pub use process::is_video_thumbnail;
pub use surface::{ImageOrigin, PosterImage, Surface};
