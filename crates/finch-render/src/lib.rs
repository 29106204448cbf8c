#![warn(missing_docs)]
//! Trajectory rendering for the Finch simulator.
//!
//! A traced path is turned into an SVG document (always) and an encoded
//! bitmap (only when a [`Rasterizer`] is installed). Model coordinates have y
//! growing up; every emitted coordinate is flipped into image space.

pub mod bounds;
pub mod error;
pub mod raster;
pub mod vector;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use finch_kinematics::Point;
use tracing::{debug, info, warn};

pub use bounds::ViewBox;
pub use error::RenderError;
#[cfg(feature = "png")]
pub use raster::PngRasterizer;
pub use raster::Rasterizer;

/// Where the two drawings are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Raster image destination.
    pub png: PathBuf,
    /// Vector document destination.
    pub svg: PathBuf,
}

impl OutputPaths {
    /// Derives the SVG path from the raster path by swapping its extension.
    pub fn from_raster(png: impl Into<PathBuf>) -> Self {
        let png = png.into();
        let svg = png.with_extension("svg");
        OutputPaths { png, svg }
    }
}

/// What [`Renderer::write_files`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// The SVG document was written.
    pub svg_written: bool,
    /// The raster image was written.
    pub png_written: bool,
}

/// Turns a path into drawings.
pub struct Renderer {
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl Renderer {
    /// Renderer with the default raster backend, if one was compiled in.
    pub fn new() -> Self {
        #[cfg(feature = "png")]
        {
            Self::with_rasterizer(Box::new(PngRasterizer::default()))
        }
        #[cfg(not(feature = "png"))]
        {
            Self::vector_only()
        }
    }

    /// Renderer that never produces raster output.
    pub fn vector_only() -> Self {
        Renderer { rasterizer: None }
    }

    /// Renderer using `rasterizer` for bitmap output.
    pub fn with_rasterizer(rasterizer: Box<dyn Rasterizer>) -> Self {
        Renderer {
            rasterizer: Some(rasterizer),
        }
    }

    /// Whether raster output is available.
    pub fn has_raster(&self) -> bool {
        self.rasterizer.is_some()
    }

    /// SVG text for `points`.
    pub fn vector_text(&self, points: &[Point]) -> Result<String, RenderError> {
        vector::to_text(points)
    }

    /// Encoded raster image for `points`, or `None` without a raster backend.
    pub fn raster_bytes(&self, points: &[Point]) -> Result<Option<Vec<u8>>, RenderError> {
        let Some(rasterizer) = &self.rasterizer else {
            return Ok(None);
        };
        let view = ViewBox::around(points).ok_or(RenderError::EmptyPath)?;
        rasterizer.rasterize(points, &view).map(Some)
    }

    /// Writes both drawings.
    ///
    /// Paths with fewer than two points are skipped. A failed SVG write is
    /// returned; raster failures are logged and only reflected in the report.
    pub fn write_files(
        &self,
        points: &[Point],
        outputs: &OutputPaths,
    ) -> Result<RenderReport, RenderError> {
        if points.len() < 2 {
            debug!(points = points.len(), "nothing to draw, skipping render");
            return Ok(RenderReport::default());
        }

        let svg = self.vector_text(points)?;
        write_file(&outputs.svg, svg.as_bytes())?;
        info!(path = %outputs.svg.display(), points = points.len(), "wrote SVG drawing");

        let png_written = match self.raster_bytes(points) {
            Ok(Some(bytes)) => match write_file(&outputs.png, &bytes) {
                Ok(()) => {
                    info!(path = %outputs.png.display(), bytes = bytes.len(), "wrote raster drawing");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "could not save raster drawing");
                    false
                }
            },
            Ok(None) => {
                debug!("no raster backend installed, skipping raster output");
                false
            }
            Err(e) => {
                warn!(error = %e, "raster rendering failed");
                false
            }
        };

        Ok(RenderReport {
            svg_written: true,
            png_written,
        })
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("rasterizer", &self.rasterizer.as_ref().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn name(&self) -> &str {
            "failing"
        }

        fn rasterize(&self, _points: &[Point], _view: &ViewBox) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Backend {
                backend: self.name().to_string(),
                message: "no display".to_string(),
            })
        }
    }

    struct CountingRasterizer(Rc<Cell<usize>>);

    impl Rasterizer for CountingRasterizer {
        fn name(&self) -> &str {
            "counting"
        }

        fn rasterize(&self, _points: &[Point], _view: &ViewBox) -> Result<Vec<u8>, RenderError> {
            self.0.set(self.0.get() + 1);
            Ok(b"raster".to_vec())
        }
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_output_paths_swap_extension() {
        let outputs = OutputPaths::from_raster("out/finch_sim_output.png");
        assert_eq!(outputs.svg, PathBuf::from("out/finch_sim_output.svg"));

        let bare = OutputPaths::from_raster("drawing");
        assert_eq!(bare.svg, PathBuf::from("drawing.svg"));
    }

    #[test]
    fn test_single_point_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("a.png"));
        let report = Renderer::new()
            .write_files(&[Point::default()], &outputs)
            .unwrap();
        assert_eq!(report, RenderReport::default());
        assert!(!outputs.svg.exists());
        assert!(!outputs.png.exists());
    }

    #[test]
    fn test_vector_only_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("a.png"));
        let renderer = Renderer::vector_only();
        assert!(!renderer.has_raster());
        assert_eq!(renderer.raster_bytes(&square()).unwrap(), None);

        let report = renderer.write_files(&square(), &outputs).unwrap();
        assert!(report.svg_written);
        assert!(!report.png_written);
        assert!(fs::read_to_string(&outputs.svg).unwrap().contains("<svg"));
        assert!(!outputs.png.exists());
    }

    #[test]
    fn test_raster_failure_keeps_svg() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("a.png"));
        let report = Renderer::with_rasterizer(Box::new(FailingRasterizer))
            .write_files(&square(), &outputs)
            .unwrap();
        assert!(report.svg_written);
        assert!(!report.png_written);
        assert!(outputs.svg.exists());
    }

    #[test]
    fn test_custom_rasterizer_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("a.png"));
        let calls = Rc::new(Cell::new(0));
        let renderer = Renderer::with_rasterizer(Box::new(CountingRasterizer(calls.clone())));

        let report = renderer.write_files(&square(), &outputs).unwrap();
        assert!(report.png_written);
        assert_eq!(calls.get(), 1);
        assert_eq!(fs::read(&outputs.png).unwrap(), b"raster");
    }

    #[test]
    fn test_unwritable_svg_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("missing").join("a.png"));
        let result = Renderer::new().write_files(&square(), &outputs);
        assert!(matches!(result, Err(RenderError::Write { .. })));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_default_renderer_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_raster(dir.path().join("a.png"));
        let report = Renderer::new().write_files(&square(), &outputs).unwrap();
        assert_eq!(
            report,
            RenderReport {
                svg_written: true,
                png_written: true
            }
        );
        let bytes = fs::read(&outputs.png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
