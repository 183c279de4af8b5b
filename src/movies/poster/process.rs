use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Limits, RgbaImage};
use reqwest::Url;
use std::io::Cursor;

pub const MAX_SOURCE_DIMENSION: u32 = 4096;
pub const MAX_SOURCE_ALLOC: u64 = 64 * 1024 * 1024;

/// Hosts serving 16:9 video thumbnails
const VIDEO_THUMBNAIL_HOSTS: &[&str] = &["youtube.com", "ytimg.com"];

#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] crate::movies::MoviesError),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("unrecognized image data: {0}")]
    Format(#[from] std::io::Error),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn is_video_thumbnail(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| VIDEO_THUMBNAIL_HOSTS.iter().any(|known| host.contains(known)))
}

/// Decode `bytes` and fit the result to a `width`x`height` poster.
///
/// Video thumbnails are center-cropped to the poster aspect ratio and then
/// scaled to exactly the poster size; anything else is scaled to fit inside
/// it with its own aspect ratio kept.
pub fn poster_from_bytes(
    bytes: &[u8],
    crop_to_poster: bool,
    width: u32,
    height: u32,
) -> Result<RgbaImage, PosterError> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_SOURCE_DIMENSION);
    limits.max_image_height = Some(MAX_SOURCE_DIMENSION);
    limits.max_alloc = Some(MAX_SOURCE_ALLOC);
    reader.limits(limits);

    let source = reader.decode()?;

    let fitted = if crop_to_poster {
        center_crop(&source, width, height).resize_exact(width, height, FilterType::Triangle)
    } else {
        source.resize(width, height, FilterType::Triangle)
    };

    Ok(fitted.to_rgba8())
}

/// Largest centered region with the `width`:`height` aspect ratio
pub fn center_crop(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (source_w, source_h) = image.dimensions();
    let target_ratio = f64::from(width) / f64::from(height);
    let source_ratio = f64::from(source_w) / f64::from(source_h);

    if source_ratio > target_ratio {
        // wider than a poster: trim the sides
        let crop_w = ((f64::from(source_h) * target_ratio).round() as u32).clamp(1, source_w);
        image.crop_imm((source_w - crop_w) / 2, 0, crop_w, source_h)
    } else {
        let crop_h = ((f64::from(source_w) / target_ratio).round() as u32).clamp(1, source_h);
        image.crop_imm(0, (source_h - crop_h) / 2, source_w, crop_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_thumbnail_detection() {
        let youtube = Url::parse("https://img.youtube.com/vi/abc/hqdefault.jpg").unwrap();
        let ytimg = Url::parse("https://i.ytimg.com/vi/abc/hqdefault.jpg").unwrap();
        let poster = Url::parse("https://m.media-amazon.com/images/poster.jpg").unwrap();

        assert!(is_video_thumbnail(&youtube));
        assert!(is_video_thumbnail(&ytimg));
        assert!(!is_video_thumbnail(&poster));
    }

    #[test]
    fn test_center_crop_wide_source() {
        let wide = DynamicImage::new_rgba8(480, 360);
        let cropped = center_crop(&wide, 300, 450);

        assert_eq!(cropped.dimensions(), (240, 360));
    }

    #[test]
    fn test_center_crop_tall_source() {
        let tall = DynamicImage::new_rgba8(200, 600);
        let cropped = center_crop(&tall, 300, 450);

        assert_eq!(cropped.dimensions(), (200, 300));
    }
}
