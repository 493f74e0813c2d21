use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::StrokeError;
use crate::glyphs::{GlyphDefinition, GlyphLookup, GlyphSource};
use crate::path::line::LineSegmenter;
use crate::path::PointPath;

/// Advance for a space, as a fraction of the scale.
pub const SPACE_WIDTH: f64 = 0.5;

/// Offsets smaller than this are treated as zero.
const OFFSET_TOLERANCE: f64 = 0.001;

/// How a run of text is drawn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TextStyle {
    /// Glyph size multiplier.
    pub scale: f64,
    /// How far the glyph is lifted off the travel line.
    pub offset_up: f64,
    /// Blank travel before and after each glyph, as a fraction of the scale.
    pub character_spacing: f64,
    /// Add tick marks between rendering stages.
    pub debug: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            scale: 5.0,
            offset_up: 0.9,
            character_spacing: 0.1,
            debug: false,
        }
    }
}

impl TextStyle {
    pub fn scale(self, scale: f64) -> TextStyle {
        TextStyle { scale, ..self }
    }

    pub fn offset_up(self, offset_up: f64) -> TextStyle {
        TextStyle { offset_up, ..self }
    }

    pub fn character_spacing(self, character_spacing: f64) -> TextStyle {
        TextStyle {
            character_spacing,
            ..self
        }
    }

    pub fn debug(self, debug: bool) -> TextStyle {
        TextStyle { debug, ..self }
    }
}

/// Horizontal advance and vertical extent of a string, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// # GlyphRenderer
///
/// Draws text into a [`PointPath`] as part of its single stroke. The travel
/// between glyphs is drawn as a line along the baseline, and each glyph is
/// entered and left at its origin, so text never lifts the pen.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sandstroke::glyphs::GlyphTable;
/// use sandstroke::glyphs::renderer::{GlyphRenderer, TextStyle};
/// use sandstroke::path::PointPath;
///
/// let renderer = GlyphRenderer::new(Arc::new(GlyphTable::block_capitals()));
/// let mut path = PointPath::new(-40.0, 0.0);
/// renderer
///     .add_line_of_text(&mut path, "SAND", &TextStyle::default().scale(10.0), 0.0)
///     .expect("Block capitals cover SAND");
/// assert!((path.current_point().x - 40.0).abs() < 1e-3);
/// ```
#[derive(Clone, Debug)]
pub struct GlyphRenderer {
    glyphs: Arc<dyn GlyphSource + Send + Sync>,
}

impl GlyphRenderer {
    pub fn new(glyphs: Arc<dyn GlyphSource + Send + Sync>) -> GlyphRenderer {
        GlyphRenderer { glyphs }
    }

    /// Resolve a non-space character to its stroke.
    fn glyph(&self, character: char) -> Result<&GlyphDefinition, StrokeError> {
        match self.glyphs.lookup(character) {
            GlyphLookup::Defined(glyph) => Ok(glyph),
            GlyphLookup::Undefined => Err(StrokeError::undefined(character)),
            GlyphLookup::Absent => Err(StrokeError::missing(character)),
        }
    }

    /// Check every character of `text` can be drawn.
    pub fn validate(&self, text: &str) -> Result<(), StrokeError> {
        text.chars()
            .filter(|c| *c != ' ')
            .try_for_each(|c| self.glyph(c).map(|_| ()))
    }

    /// Measure `text` without drawing it. Unsupported characters contribute
    /// nothing and are only logged.
    pub fn text_metrics(&self, text: &str, scale: f64, character_spacing: f64) -> TextMetrics {
        let mut metrics = TextMetrics::default();
        for character in text.chars() {
            if character == ' ' {
                metrics.width += SPACE_WIDTH * scale;
                continue;
            }
            match self.glyph(character) {
                Ok(glyph) => {
                    metrics.width += (glyph.width + 2.0 * character_spacing) * scale;
                    for (_, dy) in &glyph.path {
                        metrics.min_y = metrics.min_y.min(dy * scale);
                        metrics.max_y = metrics.max_y.max(dy * scale);
                    }
                }
                Err(_) => {
                    warn!(
                        "Character {:?} not supported, skipping for metrics calculation",
                        character
                    );
                }
            }
        }
        metrics
    }

    /// Draw one character starting at the pen position, leaving the pen on
    /// the baseline at the next character's origin.
    pub fn add_character(
        &self,
        path: &mut PointPath,
        character: char,
        style: &TextStyle,
    ) -> Result<(), StrokeError> {
        if character == ' ' {
            path.add_line(SPACE_WIDTH * style.scale, 0.0);
            return Ok(());
        }
        let glyph = self.glyph(character)?;
        self.draw_glyph(path, glyph, style);
        Ok(())
    }

    fn draw_glyph(&self, path: &mut PointPath, glyph: &GlyphDefinition, style: &TextStyle) {
        let scale = style.scale;
        let tick = |path: &mut PointPath, size: f64| {
            if style.debug {
                path.add_line(size, 90.0).add_line(size, 270.0);
            }
        };

        tick(path, 5.0);
        path.add_line(scale * style.character_spacing, 0.0);
        tick(path, 2.0);

        if glyph.start_offset != 0.0 {
            debug!("Shifting glyph start by {}", glyph.start_offset);
            let angle = if glyph.start_offset < 0.0 { 0.0 } else { 180.0 };
            path.add_line(glyph.start_offset.abs() * scale, angle);
        }
        tick(path, 1.0);

        // Down to where the stroke starts.
        path.add_line(style.offset_up, 270.0);
        let origin = path.current_point();
        for (dx, dy) in &glyph.path {
            let target_x = origin.x + dx * scale;
            let target_y = origin.y + dy * scale;
            let current = path.current_point();
            let (delta_x, delta_y) = (target_x - current.x, target_y - current.y);
            path.add_line(
                delta_x.hypot(delta_y),
                delta_y.atan2(delta_x).to_degrees(),
            );
        }
        path.add_line(style.offset_up, 90.0);
        tick(path, 1.0);

        // Underline to the next glyph origin.
        path.add_line(scale * (glyph.width + glyph.start_offset), 0.0);
        tick(path, 2.0);
        path.add_line(scale * style.character_spacing, 0.0);
        tick(path, 5.0);
    }

    /// Draw `text` left to right. Nothing is drawn if any character is
    /// unsupported.
    pub fn add_string(
        &self,
        path: &mut PointPath,
        text: &str,
        style: &TextStyle,
    ) -> Result<(), StrokeError> {
        self.validate(text)?;
        for character in text.chars() {
            self.add_character(path, character, style)?;
        }
        Ok(())
    }

    /// Draw `text` centered on the horizontal chord through the pen
    /// position, assuming the pen sits on a circle around the origin. Blank
    /// travel pads the text on both sides so the pen finishes on the
    /// opposite side of the chord.
    ///
    /// A non-zero `vertical_offset` moves the baseline before drawing and
    /// moves back afterwards.
    pub fn add_line_of_text(
        &self,
        path: &mut PointPath,
        text: &str,
        style: &TextStyle,
        vertical_offset: f64,
    ) -> Result<(), StrokeError> {
        self.validate(text)?;
        let start = path.current_point();
        let shifted = vertical_offset.abs() > OFFSET_TOLERANCE;
        if shifted {
            path.add_point(start.x, start.y + vertical_offset);
        }

        let chord = 2.0 * start.x.abs();
        let metrics = self.text_metrics(text, style.scale, style.character_spacing);
        let excess = chord - metrics.width;
        let angle = if start.x < 0.0 { 0.0 } else { 180.0 };
        debug!(
            "Line of text {:?}: chord={:.3}, width={:.3}",
            text, chord, metrics.width
        );

        if excess > 0.0 {
            path.add_line(excess / 2.0, angle);
        }
        self.add_string(path, text, style)?;
        if excess > 0.0 {
            path.add_line(excess / 2.0, angle);
        }

        if shifted {
            let current = path.current_point();
            path.add_point(current.x, start.y);
        }
        Ok(())
    }
}
