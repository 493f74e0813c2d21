use std::path::Path;

use anyhow::Result;
use geo::{BoundingRect, MapCoords, Translate};
use geo_types::{coord, LineString};
use log::info;
use serde::{Deserialize, Serialize};
use svg::node::element::{Path as SvgPath, Polyline};
use svg::Document;

use crate::export::write_atomically;
use crate::path::{round_coord, PointPath};

/// How the stroke is written into the document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgStyle {
    /// A `<path>` with one move followed by line commands.
    #[default]
    Path,
    /// A `<polyline>` listing every vertex.
    Polyline,
}

/// SVG export settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SvgOptions {
    /// Width and height of the square viewBox.
    pub size: f64,
    pub stroke_width: f64,
    pub style: SvgStyle,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            size: 200.0,
            stroke_width: 0.5,
            style: SvgStyle::Path,
        }
    }
}

/// Trait to convert a path into SVG. The drawing is shifted so its bounding
/// box starts at the origin, since SVG viewers clip negative coordinates.
pub trait ToSvg {
    /// The stroke translated into the non-negative quadrant.
    fn normalized(&self) -> LineString<f64>;

    /// Path data with one move followed by line commands, to 3 decimals.
    /// `svg`'s own `Data` stores `f32`, which loses precision on large
    /// coordinates.
    fn to_path_data(&self) -> String {
        self.normalized()
            .coords()
            .enumerate()
            .map(|(i, c)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{}{:.3},{:.3}", command, c.x, c.y)
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Vertex list for a `<polyline>` `points` attribute.
    fn to_polyline_points(&self) -> String {
        self.normalized()
            .coords()
            .map(|c| format!("{:.3},{:.3}", c.x, c.y))
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn to_svg_document(&self, options: &SvgOptions) -> Document {
        let document =
            Document::new().set("viewBox", (0.0, 0.0, options.size, options.size));
        match options.style {
            SvgStyle::Path => document.add(
                SvgPath::new()
                    .set("d", self.to_path_data())
                    .set("fill", "none")
                    .set("stroke", "black")
                    .set("stroke-width", options.stroke_width)
                    .set("stroke-linejoin", "round")
                    .set("stroke-linecap", "round"),
            ),
            SvgStyle::Polyline => document.add(
                Polyline::new()
                    .set("points", self.to_polyline_points())
                    .set("fill", "none")
                    .set("stroke", "black")
                    .set("stroke-width", options.stroke_width),
            ),
        }
    }

    fn save_svg(&self, path: &Path, options: &SvgOptions) -> Result<()> {
        write_atomically(path, &self.to_svg_document(options).to_string())?;
        info!("Saved SVG to {}", path.display());
        Ok(())
    }
}

impl ToSvg for PointPath {
    fn normalized(&self) -> LineString<f64> {
        let line = self.to_line_string();
        let shifted = match line.bounding_rect() {
            Some(bounds) => line.translate(-bounds.min().x, -bounds.min().y),
            None => line,
        };
        shifted.map_coords(|c| coord! {x: round_coord(c.x), y: round_coord(c.y)})
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::line::LineSegmenter;

    fn corner() -> PointPath {
        let mut path = PointPath::new(-5.0, -5.0);
        path.add_point(5.0, -5.0).add_point(5.0, 5.0);
        path
    }

    #[test]
    fn test_normalized() {
        let normalized = corner().normalized();
        assert_eq!(
            normalized,
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
        );
        let mut path = PointPath::new(12.5, 3.25);
        path.add_line(2.0, 90.0);
        let normalized = path.normalized();
        assert!(normalized.coords().all(|c| c.x >= 0.0 && c.y >= 0.0));
        assert_eq!(normalized.0[0], coord! {x: 0.0, y: 0.0});
        assert_eq!(normalized.0[2], coord! {x: 0.0, y: 2.0});
    }

    #[test]
    fn test_path_data() {
        assert_eq!(
            corner().to_path_data(),
            "M0.000,0.000 L10.000,0.000 L10.000,10.000"
        );
        assert_eq!(PointPath::new(1.0, 1.0).to_path_data(), "M0.000,0.000");

        let mut far = PointPath::new(0.0, 0.0);
        far.add_point(98765.432, 1234.567);
        assert_eq!(far.to_path_data(), "M0.000,0.000 L98765.432,1234.567");
        let doc = far.to_svg_document(&SvgOptions::default()).to_string();
        assert!(doc.contains("L98765.432,1234.567"));
    }

    #[test]
    fn test_polyline_points() {
        assert_eq!(
            corner().to_polyline_points(),
            "0.000,0.000 10.000,0.000 10.000,10.000"
        );
    }

    #[test]
    fn test_document() {
        let path = corner();
        let doc = path.to_svg_document(&SvgOptions::default()).to_string();
        assert!(doc.contains("<path"));
        assert!(doc.contains("viewBox"));
        assert!(doc.contains("stroke-linecap=\"round\""));
        assert!(!doc.contains("<polyline"));

        let options = SvgOptions {
            style: SvgStyle::Polyline,
            ..Default::default()
        };
        let doc = path.to_svg_document(&options).to_string();
        assert!(doc.contains("<polyline"));
        assert!(doc.contains("0.000,0.000 10.000,0.000 10.000,10.000"));
    }

    #[test]
    fn test_save_svg() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("pattern.svg");
        corner().save_svg(&target, &SvgOptions::default()).unwrap();
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("<path"));
    }

    #[test]
    fn test_options_from_ron() {
        let options: SvgOptions = ron::from_str("(size: 400.0, style: Polyline)").unwrap();
        assert_eq!(options.size, 400.0);
        assert_eq!(options.stroke_width, 0.5);
        assert_eq!(options.style, SvgStyle::Polyline);
    }
}
