//! SVG rendering of a traced path.

use finch_kinematics::Point;
use svg::Document;
use svg::node::element::{Path, Rectangle};

use crate::bounds::ViewBox;
use crate::error::RenderError;

/// Display width of the SVG document (px).
pub const SVG_WIDTH: i32 = 400;
/// The document height never exceeds this (px).
pub const SVG_MAX_HEIGHT: i32 = 400;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const BACKGROUND: &str = "white";
const STROKE: &str = "black";
const STROKE_WIDTH: f32 = 0.5;

/// Display size for a view box: fixed width, height from the aspect ratio.
pub fn svg_size(view: &ViewBox) -> (i32, i32) {
    let height = (SVG_WIDTH as f64 * view.aspect_ratio()) as i32;
    (SVG_WIDTH, height.max(2).min(SVG_MAX_HEIGHT))
}

/// Path data for a polyline through `points`, y negated for image space.
fn path_data(points: &[Point]) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, -p.y))
        .collect();
    format!("M {}", coords.join(" L "))
}

/// Builds the SVG document for `points`.
pub fn document(points: &[Point]) -> Result<Document, RenderError> {
    let view = ViewBox::around(points).ok_or(RenderError::EmptyPath)?;
    let (width, height) = svg_size(&view);
    let top = view.image_top();

    let background = Rectangle::new()
        .set("x", format!("{:.3}", view.min_x))
        .set("y", format!("{:.3}", top))
        .set("width", format!("{:.3}", view.width))
        .set("height", format!("{:.3}", view.height))
        .set("fill", BACKGROUND);

    let trace = Path::new()
        .set("d", path_data(points))
        .set("fill", "none")
        .set("stroke", STROKE)
        .set("stroke-width", STROKE_WIDTH);

    Ok(Document::new()
        .set("width", width)
        .set("height", height)
        .set(
            "viewBox",
            format!(
                "{:.3} {:.3} {:.3} {:.3}",
                view.min_x, top, view.width, view.height
            ),
        )
        .add(background)
        .add(trace))
}

/// Serializes the document for `points`, XML declaration included.
pub fn to_text(points: &[Point]) -> Result<String, RenderError> {
    let doc = document(points)?;
    Ok(format!("{XML_DECLARATION}\n{doc}\n"))
}
