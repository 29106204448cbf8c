//! Raster output. The backend is a pluggable capability: the renderer only
//! produces a bitmap when one is installed.

use finch_kinematics::Point;

use crate::bounds::ViewBox;
use crate::error::RenderError;

/// Width of the raster image (px).
pub const RASTER_WIDTH: u32 = 600;

/// Tallest raster produced (px). Near-vertical paths would otherwise ask for an
/// image millions of pixels tall.
pub const MAX_RASTER_HEIGHT: u32 = 4800;

/// Pixel size for a view box: fixed width, height from the aspect ratio, at
/// least 2 px.
///
/// Views taller than [`MAX_RASTER_HEIGHT`] allows keep their aspect ratio by
/// narrowing the image instead.
pub fn raster_size(view: &ViewBox) -> (u32, u32) {
    let aspect = view.aspect_ratio();
    let height = (RASTER_WIDTH as f64 * aspect) as u32;
    if height <= MAX_RASTER_HEIGHT {
        return (RASTER_WIDTH, height.max(2));
    }
    let width = (MAX_RASTER_HEIGHT as f64 / aspect) as u32;
    (width.max(2), MAX_RASTER_HEIGHT)
}

/// A backend able to turn a path into encoded image bytes.
pub trait Rasterizer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Draws `points` as connected segments inside `view` and returns the encoded image.
    fn rasterize(&self, points: &[Point], view: &ViewBox) -> Result<Vec<u8>, RenderError>;
}

#[cfg(feature = "png")]
pub use self::png::PngRasterizer;

#[cfg(feature = "png")]
mod png {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
    const INK: Rgb<u8> = Rgb([0, 0, 0]);

    /// Draws the path with the `image` crate and encodes it as PNG.
    #[derive(Debug, Clone, Copy)]
    pub struct PngRasterizer {
        line_width: u32,
    }

    impl PngRasterizer {
        /// Rasterizer drawing lines `line_width` pixels thick.
        pub fn new(line_width: u32) -> Self {
            PngRasterizer {
                line_width: line_width.max(1),
            }
        }

        /// Stamps a `line_width` square centred on `(x, y)`, clipped to the image.
        fn plot(&self, img: &mut RgbImage, x: i64, y: i64) {
            let lo = -((self.line_width / 2) as i64);
            let hi = lo + self.line_width as i64;
            for dy in lo..hi {
                for dx in lo..hi {
                    let (px, py) = (x + dx, y + dy);
                    if px >= 0 && py >= 0 && px < img.width() as i64 && py < img.height() as i64 {
                        img.put_pixel(px as u32, py as u32, INK);
                    }
                }
            }
        }

        /// Bresenham segment from `from` to `to`.
        fn draw_segment(&self, img: &mut RgbImage, from: (i64, i64), to: (i64, i64)) {
            let (x0, y0) = from;
            let (x1, y1) = to;
            let dx = (x1 - x0).abs();
            let dy = -(y1 - y0).abs();
            let sx = if x0 < x1 { 1 } else { -1 };
            let sy = if y0 < y1 { 1 } else { -1 };
            let mut err = dx + dy;

            let (mut x, mut y) = (x0, y0);
            loop {
                self.plot(img, x, y);
                if x == x1 && y == y1 {
                    break;
                }
                let e2 = 2 * err;
                if e2 >= dy {
                    err += dy;
                    x += sx;
                }
                if e2 <= dx {
                    err += dx;
                    y += sy;
                }
            }
        }
    }

    impl Default for PngRasterizer {
        fn default() -> Self {
            PngRasterizer::new(2)
        }
    }

    impl Rasterizer for PngRasterizer {
        fn name(&self) -> &str {
            "png"
        }

        fn rasterize(&self, points: &[Point], view: &ViewBox) -> Result<Vec<u8>, RenderError> {
            let (width, height) = raster_size(view);
            let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

            let mut mapped = points.iter().map(|p| view.to_pixel(*p, width, height));
            if let Some(mut prev) = mapped.next() {
                for next in mapped {
                    self.draw_segment(&mut img, prev, next);
                    prev = next;
                }
            }

            let mut bytes = Vec::new();
            img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
            Ok(bytes)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn decode(bytes: &[u8]) -> RgbImage {
            image::load_from_memory_with_format(bytes, ImageFormat::Png)
                .unwrap()
                .to_rgb8()
        }

        #[test]
        fn test_png_dimensions_follow_aspect_ratio() {
            let points = [Point::new(0.0, 0.0), Point::new(20.0, 10.0)];
            let view = ViewBox::around(&points).unwrap();
            let bytes = PngRasterizer::default().rasterize(&points, &view).unwrap();
            let img = decode(&bytes);
            assert_eq!((img.width(), img.height()), (600, 300));
        }

        #[test]
        fn test_segment_is_drawn_in_ink() {
            let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
            let view = ViewBox::around(&points).unwrap();
            let img = decode(&PngRasterizer::default().rasterize(&points, &view).unwrap());

            // the horizontal leg runs along model y = 0, near the image bottom
            let (x, y) = view.to_pixel(Point::new(5.0, 0.0), img.width(), img.height());
            assert_eq!(*img.get_pixel(x as u32, y as u32), INK);
            // a corner far from the path stays white
            let (x, y) = view.to_pixel(Point::new(0.0, 10.0), img.width(), img.height());
            assert_eq!(*img.get_pixel(x as u32, y as u32), BACKGROUND);
        }

        #[test]
        fn test_vertical_path_height_is_clamped() {
            let points = [Point::new(0.0, 0.0), Point::new(0.0, 30.0)];
            let view = ViewBox::around(&points).unwrap();
            assert_eq!(raster_size(&view), (2, MAX_RASTER_HEIGHT));
        }

        #[test]
        fn test_tall_path_keeps_its_aspect_ratio() {
            // 1 cm wide, 100 cm tall
            let points = [Point::new(0.0, 0.0), Point::new(1.0, 100.0)];
            let view = ViewBox::around(&points).unwrap();
            let (width, height) = raster_size(&view);
            assert_eq!(height, MAX_RASTER_HEIGHT);
            assert!((47..=48).contains(&width), "width {width}");

            let img = decode(&PngRasterizer::default().rasterize(&points, &view).unwrap());
            assert_eq!((img.width(), img.height()), (width, height));
            let scale_x = width as f64 / view.width;
            let scale_y = height as f64 / view.height;
            assert!((scale_x / scale_y - 1.0).abs() < 0.05);
        }
    }
}
