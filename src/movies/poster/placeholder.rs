use image::{Rgba, RgbaImage};

/// Gradient used when no movie is known (card background to accent purple)
const DEFAULT_TOP: [u8; 3] = [30, 41, 59];
const DEFAULT_BOTTOM: [u8; 3] = [147, 51, 234];

const STRIP_WIDTH: u32 = 6;
const HOLE_SIZE: u32 = 4;
const HOLES_PER_STRIP: u32 = 10;
const PLAY_ICON_SIZE: u32 = 24;
const PLAY_ICON_LIFT: u32 = 20;

/// Render a poster-shaped placeholder.
///
/// With a title the gradient colors are derived from a stable hash of it, so
/// a given title always gets the same look, and a play glyph is drawn in the
/// middle.
pub fn render(title: Option<&str>, width: u32, height: u32) -> RgbaImage {
    let (top, bottom) = title.map_or((DEFAULT_TOP, DEFAULT_BOTTOM), gradient_for);

    let mut canvas = RgbaImage::from_fn(width, height, |_, y| {
        let t = if height > 1 {
            f64::from(y) / f64::from(height - 1)
        } else {
            0.0
        };
        let [r, g, b] = lerp(top, bottom, t);
        Rgba([r, g, b, 255])
    });

    if title.is_some() {
        draw_play_icon(&mut canvas);
    }
    draw_film_strips(&mut canvas);

    canvas
}

/// djb2 over the title bytes; stable across runs and platforms
pub fn title_hash(title: &str) -> u64 {
    title
        .bytes()
        .fold(5381u64, |hash, byte| hash.wrapping_mul(33).wrapping_add(u64::from(byte)))
}

pub fn gradient_for(title: &str) -> ([u8; 3], [u8; 3]) {
    let hash = title_hash(title);
    let hue_top = (hash % 360) as f64;
    let hue_bottom = (hash.wrapping_mul(2) % 360) as f64;

    (hsv_to_rgb(hue_top, 0.6, 0.7), hsv_to_rgb(hue_bottom, 0.8, 0.5))
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    [to_channel(r + m), to_channel(g + m), to_channel(b + m)]
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn lerp(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |a: u8, b: u8| to_channel((f64::from(a) + (f64::from(b) - f64::from(a)) * t) / 255.0);
    [mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])]
}

fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], alpha: f64) {
    for (channel, over) in pixel.0.iter_mut().zip(color) {
        let mixed = f64::from(*channel) * (1.0 - alpha) + f64::from(over) * alpha;
        *channel = mixed.round().clamp(0.0, 255.0) as u8;
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: [u8; 3], alpha: f64) {
    let x_end = (x + w).min(canvas.width());
    let y_end = (y + h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            blend(canvas.get_pixel_mut(px, py), color, alpha);
        }
    }
}

fn draw_film_strips(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    if width < STRIP_WIDTH * 2 || height < HOLES_PER_STRIP {
        return;
    }

    let right = width - STRIP_WIDTH;
    fill_rect(canvas, 0, 0, STRIP_WIDTH, height, [255, 255, 255], 0.08);
    fill_rect(canvas, right, 0, STRIP_WIDTH, height, [255, 255, 255], 0.08);

    let spacing = height / HOLES_PER_STRIP;
    let inset = (STRIP_WIDTH - HOLE_SIZE) / 2;
    for i in 0..HOLES_PER_STRIP {
        let y = (i * spacing + spacing / 2).saturating_sub(HOLE_SIZE / 2);
        fill_rect(canvas, inset, y, HOLE_SIZE, HOLE_SIZE, [0, 0, 0], 0.3);
        fill_rect(canvas, right + inset, y, HOLE_SIZE, HOLE_SIZE, [0, 0, 0], 0.3);
    }
}

/// Right-pointing triangle slightly above center
fn draw_play_icon(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let half = PLAY_ICON_SIZE / 2;
    if width <= PLAY_ICON_SIZE || height < PLAY_ICON_SIZE + 2 * PLAY_ICON_LIFT {
        return;
    }

    let cx = width / 2;
    let cy = height / 2 - PLAY_ICON_LIFT;
    let left = cx - half;
    let right = (cx + half).min(width - 1);

    for px in left..=right {
        let progress = f64::from(px - left) / f64::from(PLAY_ICON_SIZE);
        let reach = (f64::from(half) * (1.0 - progress)).round() as u32;
        for py in cy - reach..=cy + reach {
            blend(canvas.get_pixel_mut(px, py), [255, 255, 255], 0.6);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_title_same_placeholder() {
        let a = render(Some("The Matrix"), 300, 450);
        let b = render(Some("The Matrix"), 300, 450);
        let other = render(Some("Inception"), 300, 450);

        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn test_default_gradient_without_title() {
        let canvas = render(None, 300, 450);
        let top = canvas.get_pixel(150, 0);
        let bottom = canvas.get_pixel(150, 449);

        assert_eq!(&top.0[..3], &DEFAULT_TOP);
        assert_eq!(&bottom.0[..3], &DEFAULT_BOTTOM);
    }

    #[test]
    fn test_titled_placeholder_at_small_sizes() {
        for (width, height) in [(1, 450), (24, 450), (25, 450), (25, 64), (300, 1), (0, 0)] {
            let canvas = render(Some("Title"), width, height);
            assert_eq!(canvas.dimensions(), (width, height));
        }
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
    }
}
