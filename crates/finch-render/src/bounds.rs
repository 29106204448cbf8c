//! Padded bounding box of a path, in model coordinates.

use finch_kinematics::Point;

/// Fraction of each axis span added as padding on both sides.
pub const MARGIN: f64 = 0.1;

/// Smallest span an axis may have, so a straight or single-point path still
/// produces a non-degenerate view.
pub const MIN_SPAN: f64 = 1e-6;

/// Axis-aligned view of a path. Model y grows up; image y grows down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Left edge (cm).
    pub min_x: f64,
    /// Bottom edge in model coordinates (cm).
    pub min_y: f64,
    /// Padded width (cm).
    pub width: f64,
    /// Padded height (cm).
    pub height: f64,
}

impl ViewBox {
    /// Padded bounds around `points`, or `None` if there are no points.
    pub fn around(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (min_x, max_x, min_y, max_y) = points.iter().fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );

        let dx = (max_x - min_x).max(MIN_SPAN);
        let dy = (max_y - min_y).max(MIN_SPAN);
        Some(ViewBox {
            min_x: min_x - dx * MARGIN,
            min_y: min_y - dy * MARGIN,
            width: dx * (1.0 + 2.0 * MARGIN),
            height: dy * (1.0 + 2.0 * MARGIN),
        })
    }

    /// Top edge in image coordinates, i.e. the negated model-space maximum.
    pub fn image_top(&self) -> f64 {
        -self.min_y - self.height
    }

    /// Height over width.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width > 0.0 {
            self.height / self.width
        } else {
            1.0
        }
    }

    /// Maps a model point into a `pixel_width` x `pixel_height` image.
    ///
    /// Each axis is scaled independently, so a flat path drawn at the 2 px
    /// minimum height is stretched vertically.
    pub fn to_pixel(&self, p: Point, pixel_width: u32, pixel_height: u32) -> (i64, i64) {
        let scale_x = pixel_width as f64 / self.width;
        let scale_y = pixel_height as f64 / self.height;
        let sx = ((p.x - self.min_x) * scale_x) as i64;
        let sy = ((-p.y - self.image_top()) * scale_y) as i64;
        (sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_empty_path_has_no_bounds() {
        assert!(ViewBox::around(&[]).is_none());
    }

    #[test]
    fn test_padding_is_ten_percent_per_side() {
        let view = ViewBox::around(&[Point::new(0.0, 0.0), Point::new(20.0, 10.0)]).unwrap();
        assert!((view.min_x - (-2.0)).abs() < EPSILON);
        assert!((view.min_y - (-1.0)).abs() < EPSILON);
        assert!((view.width - 24.0).abs() < EPSILON);
        assert!((view.height - 12.0).abs() < EPSILON);
        assert!((view.image_top() - (-11.0)).abs() < EPSILON);
        assert!((view.aspect_ratio() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_axis_gets_minimum_span() {
        let view = ViewBox::around(&[Point::new(0.0, 0.0), Point::new(20.0, 0.0)]).unwrap();
        assert!(view.height > 0.0);
        assert!((view.height - MIN_SPAN * 1.2).abs() < EPSILON);

        let single = ViewBox::around(&[Point::new(3.0, 4.0)]).unwrap();
        assert!(single.width > 0.0 && single.height > 0.0);
    }

    #[test]
    fn test_to_pixel_flips_y() {
        let view = ViewBox::around(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap();
        // model top-left corner of the padded box lands on the image origin
        let (x, y) = view.to_pixel(Point::new(-1.0, 11.0), 120, 120);
        assert_eq!((x, y), (0, 0));
        // model origin is near the bottom-left
        let (x, y) = view.to_pixel(Point::new(0.0, 0.0), 120, 120);
        assert_eq!((x, y), (10, 110));
    }
}
