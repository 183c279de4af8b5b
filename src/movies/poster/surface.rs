use image::RgbaImage;
use std::sync::Arc;

/// Where a bitmap came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageOrigin {
    Placeholder,
    Network,
}

/// Decoded, poster-sized bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterImage {
    pixels: RgbaImage,
    origin: ImageOrigin,
}

impl PosterImage {
    pub fn new(pixels: RgbaImage, origin: ImageOrigin) -> Self {
        Self { pixels, origin }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == ImageOrigin::Placeholder
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Memory held by the pixel buffer
    pub fn byte_size(&self) -> usize {
        self.pixels.as_raw().len()
    }
}

/// Anything that can display a poster: an image view, a list cell, a recording double.
///
/// `paint` may be called from any thread; implementations hop to their own
/// rendering context if they need one.
pub trait Surface: Send + Sync {
    fn paint(&self, image: Arc<PosterImage>);
}
