use super::placeholder;
use super::process::{self, PosterError};
use super::surface::{ImageOrigin, PosterImage, Surface};
use crate::config::ImageConfig;
use crate::movies::provider::{MoviesService, Transport};
use crate::movies::types::Movie;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use moka::sync::Cache;
use reqwest::Url;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

/// Outcome of [`ImageLoader::load`]
#[derive(Debug)]
pub enum LoadStatus {
    /// Painted synchronously from the cache
    Cached,
    /// Attached to a fetch already running for the same URL
    Joined,
    /// A new fetch was started; the handle resolves after painting
    Started(JoinHandle<()>),
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: u64,
    pub weighted_size: u64,
    pub in_flight: usize,
}

/// Running fetch for one URL
struct InFlight {
    generation: u64,
    surfaces: Vec<Arc<dyn Surface>>,
    task: AbortHandle,
}

/// URL-keyed poster loader with a bounded in-memory cache.
///
/// Cloning is cheap and every clone shares the same cache and in-flight
/// registry. Fetches are spawned on the runtime handed to [`ImageLoader::new`],
/// so `load` may be called from threads outside that runtime.
#[derive(Clone)]
pub struct ImageLoader {
    runtime: Handle,
    transport: Arc<dyn Transport>,
    cache: Cache<String, Arc<PosterImage>>,
    in_flight: Arc<DashMap<String, InFlight>>,
    generations: Arc<AtomicU64>,
    config: ImageConfig,
    default_placeholder: Arc<PosterImage>,
}

impl ImageLoader {
    pub fn new(transport: Arc<dyn Transport>, config: ImageConfig, runtime: Handle) -> Self {
        // Every entry weighs at least its share of the byte budget, so the
        // byte bound also caps the entry count at `max_entries`.
        let min_weight = (config.max_bytes / config.max_entries.max(1)).max(1);
        let cache = Cache::builder()
            .max_capacity(config.max_bytes)
            .weigher(move |_url: &String, image: &Arc<PosterImage>| -> u32 {
                let weight = (image.byte_size() as u64).max(min_weight);
                u32::try_from(weight).unwrap_or(u32::MAX)
            })
            .build();

        let default_placeholder = Arc::new(PosterImage::new(
            placeholder::render(None, config.poster_width, config.poster_height),
            ImageOrigin::Placeholder,
        ));

        Self {
            runtime,
            transport,
            cache,
            in_flight: Arc::new(DashMap::new()),
            generations: Arc::new(AtomicU64::new(0)),
            config,
            default_placeholder,
        }
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Generated placeholder, keyed on the movie title when there is one
    pub fn placeholder(&self, movie: Option<&Movie>) -> Arc<PosterImage> {
        match movie {
            Some(movie) => Arc::new(PosterImage::new(
                placeholder::render(
                    Some(movie.title()),
                    self.config.poster_width,
                    self.config.poster_height,
                ),
                ImageOrigin::Placeholder,
            )),
            None => Arc::clone(&self.default_placeholder),
        }
    }

    /// Paint `url` onto `surface`.
    ///
    /// The placeholder is painted immediately. A cached bitmap is painted
    /// synchronously; otherwise the surface is painted when the fetch for
    /// `url` completes, unless that fetch is cancelled first. Concurrent loads
    /// of one URL share a single fetch.
    pub fn load(
        &self,
        url: &Url,
        surface: Arc<dyn Surface>,
        placeholder: Option<Arc<PosterImage>>,
    ) -> LoadStatus {
        surface.paint(placeholder.unwrap_or_else(|| Arc::clone(&self.default_placeholder)));

        let key = url.as_str().to_string();
        if let Some(image) = self.cache.get(&key) {
            surface.paint(image);
            return LoadStatus::Cached;
        }

        let cached = match self.in_flight.entry(key) {
            Entry::Occupied(mut entry) => {
                debug!("Joining in-flight image load for {url}");
                entry.get_mut().surfaces.push(surface);
                return LoadStatus::Joined;
            }
            Entry::Vacant(entry) => {
                // Completion caches before it deregisters, so this cannot miss
                // a fetch that finished after the first lookup.
                let Some(image) = self.cache.get(entry.key()) else {
                    let generation = self.generations.fetch_add(1, Ordering::Relaxed);
                    let loader = self.clone();
                    let target = url.clone();
                    let handle = self
                        .runtime
                        .spawn(async move { loader.complete(target, generation).await });

                    entry.insert(InFlight {
                        generation,
                        surfaces: vec![surface],
                        task: handle.abort_handle(),
                    });
                    return LoadStatus::Started(handle);
                };
                image
            }
        };

        // The registry shard is unlocked here, so `paint` may call back in.
        surface.paint(cached);
        LoadStatus::Cached
    }

    /// Cancel the in-flight fetch for `url`, if any
    pub fn cancel_load(&self, url: &Url) {
        if let Some((_, in_flight)) = self.in_flight.remove(url.as_str()) {
            in_flight.task.abort();
            debug!("Cancelled image load for {url}");
        }
    }

    /// Paint a title-derived placeholder, then swap in the trailer thumbnail
    /// if the movie has one.
    ///
    /// The returned handle resolves once the trailer lookup is done, with the
    /// status of the thumbnail load it started, if any.
    pub fn load_movie_poster(
        &self,
        movie: &Movie,
        surface: Arc<dyn Surface>,
        service: Arc<dyn MoviesService>,
    ) -> JoinHandle<Option<LoadStatus>> {
        let placeholder = self.placeholder(Some(movie));
        surface.paint(Arc::clone(&placeholder));

        let loader = self.clone();
        let id = movie.id().to_string();
        self.runtime.spawn(async move {
            let detail = match service.get_movie(&id).await {
                Ok(detail) => detail,
                Err(e) => {
                    debug!("Trailer lookup for {id} failed: {e}");
                    return None;
                }
            };

            let Some(url) = detail.thumbnail_hq_url() else {
                debug!("No trailer for {id}, keeping placeholder");
                return None;
            };
            Some(loader.load(&url, surface, Some(placeholder)))
        })
    }

    pub fn cached(&self, url: &Url) -> Option<Arc<PosterImage>> {
        self.cache.get(url.as_str())
    }

    pub fn is_loading(&self, url: &Url) -> bool {
        self.in_flight.contains_key(url.as_str())
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        CacheStats {
            entries: self.cache.entry_count(),
            weighted_size: self.cache.weighted_size(),
            in_flight: self.in_flight.len(),
        }
    }

    /// Drop every cached bitmap; in-flight loads are left running
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    async fn complete(&self, url: Url, generation: u64) {
        let key = url.as_str();

        let image = match self.fetch_poster(&url).await {
            Ok(image) => Arc::new(image),
            Err(e) => {
                warn!("Failed to load image from {url}: {e}");
                self.in_flight
                    .remove_if(key, |_, entry| entry.generation == generation);
                return;
            }
        };

        // Only the registered generation may touch the cache.
        {
            let Some(entry) = self.in_flight.get(key) else {
                debug!("Image load for {url} was cancelled");
                return;
            };
            if entry.generation != generation {
                debug!("Image load for {url} was superseded");
                return;
            }
            self.cache.insert(key.to_string(), Arc::clone(&image));
        }

        let Some((_, in_flight)) = self
            .in_flight
            .remove_if(key, |_, entry| entry.generation == generation)
        else {
            return;
        };

        info!(
            "Loaded and cached image from {url} ({} surfaces)",
            in_flight.surfaces.len()
        );
        for surface in in_flight.surfaces {
            surface.paint(Arc::clone(&image));
        }
    }

    async fn fetch_poster(&self, url: &Url) -> Result<PosterImage, PosterError> {
        let response = self.transport.get(url, &[]).await?;
        if !response.is_success() {
            return Err(PosterError::Status(response.status));
        }

        let crop = process::is_video_thumbnail(url);
        let (width, height) = (self.config.poster_width, self.config.poster_height);
        let pixels = tokio::task::spawn_blocking(move || {
            process::poster_from_bytes(&response.body, crop, width, height)
        })
        .await??;

        Ok(PosterImage::new(pixels, ImageOrigin::Network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::provider::RawResponse;
    use async_trait::async_trait;
    use image::{ImageFormat, Rgba, RgbaImage};
    use parking_lot::Mutex;
    use std::io::Cursor;

    struct StaticTransport(Vec<u8>);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn get(
            &self,
            _url: &Url,
            _headers: &[(&'static str, String)],
        ) -> crate::movies::Result<RawResponse> {
            Ok(RawResponse::new(200, self.0.clone()))
        }
    }

    #[derive(Default)]
    struct PaintLog(Mutex<Vec<Arc<PosterImage>>>);

    impl Surface for PaintLog {
        fn paint(&self, image: Arc<PosterImage>) {
            self.0.lock().push(image);
        }
    }

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(60, 90, Rgba([10, 20, 30, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_stale_generation_never_paints_or_caches() {
        let loader = ImageLoader::new(
            Arc::new(StaticTransport(png())),
            ImageConfig::default(),
            Handle::current(),
        );
        let url = Url::parse("https://img.test/superseded.png").unwrap();
        let log = Arc::new(PaintLog::default());
        let idle = tokio::spawn(async {});

        loader.in_flight.insert(
            url.as_str().to_string(),
            InFlight {
                generation: 7,
                surfaces: vec![log.clone() as Arc<dyn Surface>],
                task: idle.abort_handle(),
            },
        );

        loader.complete(url.clone(), 3).await;

        assert!(loader.cached(&url).is_none());
        assert!(log.0.lock().is_empty());
        assert!(loader.is_loading(&url));

        loader.complete(url.clone(), 7).await;

        assert!(loader.cached(&url).is_some());
        assert_eq!(log.0.lock().len(), 1);
        assert!(!loader.is_loading(&url));
    }
}
