use std::io::Read;
use std::path::Path;

use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::StrokeError;
use crate::glyphs::renderer::{GlyphRenderer, TextStyle};
use crate::path::polar::PolarPathGenerator;
use crate::path::PointPath;

/// Slack allowed when testing a line against the work-area circle.
pub const BOUNDARY_TOLERANCE: f64 = 0.001;

/// One line of a text block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LineConfig {
    pub text: String,
    pub scale: f64,
    pub offset_up: f64,
    pub character_spacing: f64,
    pub debug: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        let style = TextStyle::default();
        LineConfig {
            text: String::new(),
            scale: style.scale,
            offset_up: style.offset_up,
            character_spacing: style.character_spacing,
            debug: style.debug,
        }
    }
}

impl LineConfig {
    pub fn new(text: &str) -> LineConfig {
        LineConfig {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn scale(self, scale: f64) -> LineConfig {
        LineConfig { scale, ..self }
    }

    pub fn offset_up(self, offset_up: f64) -> LineConfig {
        LineConfig { offset_up, ..self }
    }

    pub fn character_spacing(self, character_spacing: f64) -> LineConfig {
        LineConfig {
            character_spacing,
            ..self
        }
    }

    pub fn debug(self, debug: bool) -> LineConfig {
        LineConfig { debug, ..self }
    }

    pub fn style(&self) -> TextStyle {
        TextStyle {
            scale: self.scale,
            offset_up: self.offset_up,
            character_spacing: self.character_spacing,
            debug: self.debug,
        }
    }

    /// Vertical room this line takes up in a block.
    pub fn extent(&self, line_spacing: f64) -> f64 {
        self.scale * line_spacing + self.offset_up
    }
}

/// A block of lines plus the spacing between them, as loaded from RON.
///
/// ```ron
/// (
///     line_spacing: 1.3,
///     lines: [
///         (text: "HELLO", scale: 15.0),
///         (text: "SAND", scale: 20.0),
///     ],
/// )
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TextBlock {
    pub line_spacing: f64,
    pub lines: Vec<LineConfig>,
}

impl Default for TextBlock {
    fn default() -> Self {
        TextBlock {
            line_spacing: 1.4,
            lines: vec![],
        }
    }
}

impl TextBlock {
    pub fn from_ron_str(data: &str) -> Result<TextBlock> {
        Ok(ron::from_str(data)?)
    }

    pub fn from_file(path: &Path) -> Result<TextBlock> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        TextBlock::from_ron_str(data.as_str())
    }
}

/// Where a validated line will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlacement {
    /// y of the travel line the text sits on.
    pub baseline: f64,
    pub half_width: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Angle on a circle of `radius` where it crosses `y = baseline`, on the
/// left-hand side.
pub fn entry_angle(baseline: f64, radius: f64) -> f64 {
    if baseline.abs() < radius {
        180.0 - (baseline / radius).asin().to_degrees()
    } else {
        warn!(
            "Vertical offset {} exceeds radius {}, clipping.",
            baseline, radius
        );
        180.0
    }
}

/// # TextBlockLayout
///
/// Lays out several lines of text as a vertically centered block inside the
/// circle the pen currently sits on. Every line is checked against that
/// circle before anything is drawn, then each line is reached by looping
/// around the circle to the height of its baseline.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sandstroke::glyphs::GlyphTable;
/// use sandstroke::glyphs::layout::{LineConfig, TextBlockLayout};
/// use sandstroke::glyphs::renderer::GlyphRenderer;
/// use sandstroke::path::PointPath;
/// use sandstroke::path::polar::PolarPathGenerator;
///
/// let renderer = GlyphRenderer::new(Arc::new(GlyphTable::block_capitals()));
/// let mut path = PointPath::new(0.0, 0.0);
/// path.spiral_out(100.0, 10.0, 0.0);
/// TextBlockLayout::new(&renderer)
///     .add_lines_of_text(
///         &mut path,
///         &[LineConfig::new("HELLO").scale(15.0), LineConfig::new("SAND").scale(20.0)],
///         1.3,
///     )
///     .expect("Both lines fit in the circle");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TextBlockLayout<'r> {
    renderer: &'r GlyphRenderer,
}

impl<'r> TextBlockLayout<'r> {
    pub fn new(renderer: &'r GlyphRenderer) -> TextBlockLayout<'r> {
        TextBlockLayout { renderer }
    }

    /// Baseline y for each line, centering the whole block on y = 0.
    pub fn baselines(lines: &[LineConfig], line_spacing: f64) -> Vec<f64> {
        let total: f64 = lines.iter().map(|line| line.extent(line_spacing)).sum();
        let mut running = -total / 2.0;
        lines
            .iter()
            .map(|line| {
                let extent = line.extent(line_spacing);
                // offset_up lifts the glyph, so the baseline sits at the far
                // edge of the band.
                let baseline = running + extent - line.offset_up;
                running += extent;
                baseline
            })
            .collect()
    }

    /// Validate every line against a circle of `radius` and return where
    /// each one goes. Nothing is drawn.
    pub fn plan(
        &self,
        lines: &[LineConfig],
        line_spacing: f64,
        radius: f64,
    ) -> Result<Vec<LinePlacement>, StrokeError> {
        let limit = (radius + BOUNDARY_TOLERANCE).powi(2);
        let baselines = TextBlockLayout::baselines(lines, line_spacing);
        let mut placements = Vec::with_capacity(lines.len());
        for (line_index, (line, baseline)) in lines.iter().zip(baselines).enumerate() {
            self.renderer.validate(&line.text)?;
            let metrics =
                self.renderer
                    .text_metrics(&line.text, line.scale, line.character_spacing);
            let half_width = metrics.width / 2.0;
            // Glyph strokes are measured from the baseline lifted by the
            // scaled offset.
            let stroke_start = baseline - line.scale * line.offset_up;
            let y_min = baseline.min(stroke_start + metrics.min_y);
            let y_max = baseline.max(stroke_start + metrics.max_y);

            for x in [-half_width, half_width] {
                for y in [y_min, y_max] {
                    if x * x + y * y > limit {
                        return Err(StrokeError::BoundsExceeded {
                            line_index,
                            text: line.text.clone(),
                            point: (x, y),
                            distance: x.hypot(y),
                            radius,
                        });
                    }
                }
            }
            placements.push(LinePlacement {
                baseline,
                half_width,
                y_min,
                y_max,
            });
        }
        Ok(placements)
    }

    /// Draw `lines` as a block centered in the circle the pen is on. Either
    /// every line is drawn or, on error, the path is left untouched.
    pub fn add_lines_of_text(
        &self,
        path: &mut PointPath,
        lines: &[LineConfig],
        line_spacing: f64,
    ) -> Result<(), StrokeError> {
        let radius = path.radius();
        let placements = self.plan(lines, line_spacing, radius)?;

        for (line, placement) in lines.iter().zip(placements) {
            let angle = entry_angle(placement.baseline, radius);
            debug!(
                "Line {:?} starts at {:.2} degrees, baseline {:.3}",
                line.text, angle, placement.baseline
            );
            path.outer_loop(0.0, angle);
            self.renderer
                .add_line_of_text(path, &line.text, &line.style(), 0.0)?;
        }
        Ok(())
    }

    pub fn add_text_block(&self, path: &mut PointPath, block: &TextBlock) -> Result<(), StrokeError> {
        self.add_lines_of_text(path, &block.lines, block.line_spacing)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::glyphs::GlyphTable;
    use std::sync::Arc;

    fn renderer() -> GlyphRenderer {
        GlyphRenderer::new(Arc::new(GlyphTable::block_capitals()))
    }

    fn circle(radius: f64) -> PointPath {
        let mut path = PointPath::new(0.0, 0.0);
        path.spiral_out(radius, 4.0, 0.0);
        path
    }

    fn sample_lines() -> Vec<LineConfig> {
        vec![
            LineConfig::new("HELLO").scale(15.0),
            LineConfig::new("SAND").scale(20.0),
            LineConfig::new("TABLE").scale(15.0),
        ]
    }

    #[test]
    fn test_baselines() {
        let lines = vec![
            LineConfig::new("A").scale(10.0).offset_up(1.0),
            LineConfig::new("B").scale(10.0).offset_up(1.0),
        ];
        let baselines = TextBlockLayout::baselines(&lines, 1.0);
        assert_eq!(baselines, vec![-1.0, 10.0]);
        assert!(TextBlockLayout::baselines(&[], 1.4).is_empty());
    }

    #[test]
    fn test_entry_angle() {
        assert!((entry_angle(0.0, 50.0) - 180.0).abs() < 1e-9);
        assert!((entry_angle(25.0, 50.0) - 150.0).abs() < 1e-9);
        assert!((entry_angle(-25.0, 50.0) - 210.0).abs() < 1e-9);
        assert_eq!(entry_angle(60.0, 50.0), 180.0);
    }

    #[test]
    fn test_bounds_exceeded_leaves_path_unchanged() {
        let r = renderer();
        let mut path = PointPath::new(-5.0, 0.0);
        let lines = vec![
            LineConfig::new("AB").scale(50.0),
            LineConfig::new("AB").scale(50.0),
        ];
        let result = TextBlockLayout::new(&r).add_lines_of_text(&mut path, &lines, 1.4);
        match result {
            Err(StrokeError::BoundsExceeded {
                line_index, point, ..
            }) => {
                assert_eq!(line_index, 0);
                assert!((point.0 + 40.0).abs() < 1e-9);
            }
            other => panic!("Expected BoundsExceeded, got {:?}", other),
        }
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_late_failure_is_atomic() {
        let r = renderer();
        let mut path = circle(100.0);
        let before = path.clone();
        let mut lines = sample_lines();
        lines.push(LineConfig::new("TOO WIDE TO DRAW AT ALL").scale(15.0));
        let result = TextBlockLayout::new(&r).add_lines_of_text(&mut path, &lines, 1.3);
        assert!(matches!(
            result,
            Err(StrokeError::BoundsExceeded { line_index: 3, .. })
        ));
        assert_eq!(path, before);

        let lines = vec![LineConfig::new("SAND"), LineConfig::new("HOW?")];
        let result = TextBlockLayout::new(&r).add_lines_of_text(&mut path, &lines, 1.3);
        assert_eq!(result, Err(StrokeError::undefined('?')));
        assert_eq!(path, before);
    }

    #[test]
    fn test_block_stays_inside_circle() {
        let r = renderer();
        let mut path = circle(100.0);
        let before = path.len();
        TextBlockLayout::new(&r)
            .add_lines_of_text(&mut path, &sample_lines(), 1.3)
            .unwrap();
        assert!(path.len() > before);
        for c in path.points() {
            assert!(c.x.hypot(c.y) <= 100.0 + 0.05);
        }
        // The pen finishes on the right-hand edge of the last line.
        let placements = TextBlockLayout::new(&r)
            .plan(&sample_lines(), 1.3, 100.0)
            .unwrap();
        let last = placements[2].baseline;
        let end = path.current_point();
        assert!((end.y - last).abs() < 0.05);
        assert!((end.x - (100.0f64.powi(2) - last.powi(2)).sqrt()).abs() < 0.05);
    }

    #[test]
    fn test_plan_extents() {
        let r = renderer();
        let placements = TextBlockLayout::new(&r)
            .plan(&sample_lines(), 1.3, 100.0)
            .unwrap();
        assert_eq!(placements.len(), 3);
        let first = placements[0];
        assert!((first.baseline - -14.35).abs() < 1e-9);
        assert!((first.half_width - 28.125).abs() < 1e-9);
        // -14.35 - 15 * 0.9 - 15
        assert!((first.y_min - -42.85).abs() < 1e-9);
        assert!((first.y_max - -14.35).abs() < 1e-9);
        for pair in placements.windows(2) {
            assert!(pair[0].baseline < pair[1].baseline);
        }
    }

    #[test]
    fn test_bounds_exceeded_vertically() {
        let r = renderer();
        let lines = vec![LineConfig::new("L").scale(10.0)];
        let result = TextBlockLayout::new(&r).plan(&lines, 1.4, 10.0);
        match result {
            Err(StrokeError::BoundsExceeded {
                line_index,
                point,
                distance,
                ..
            }) => {
                assert_eq!(line_index, 0);
                // Narrow enough to fit, too tall once the offset is scaled.
                assert!((point.0 + 3.5).abs() < 1e-9);
                assert!((point.1 + 12.45).abs() < 1e-9);
                assert!(distance > 10.001);
            }
            other => panic!("Expected BoundsExceeded, got {:?}", other),
        }

        let placements = TextBlockLayout::new(&r).plan(&lines, 1.4, 13.0).unwrap();
        assert!((placements[0].baseline - 6.55).abs() < 1e-9);
        assert!((placements[0].y_min + 12.45).abs() < 1e-9);
    }

    #[test]
    fn test_text_block_from_ron() {
        let block = TextBlock::from_ron_str(
            r#"(line_spacing: 1.3, lines: [(text: "HELLO", scale: 15.0), (text: "SAND")])"#,
        )
        .unwrap();
        assert_eq!(block.line_spacing, 1.3);
        assert_eq!(block.lines[0], LineConfig::new("HELLO").scale(15.0));
        assert_eq!(block.lines[1].scale, 5.0);
        assert_eq!(block.lines[1].offset_up, 0.9);

        let r = renderer();
        let mut path = circle(60.0);
        TextBlockLayout::new(&r)
            .add_text_block(&mut path, &block)
            .unwrap();
        assert_eq!(TextBlock::default().line_spacing, 1.4);
    }
}
