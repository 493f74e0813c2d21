//! Continuous single-stroke drawing for kinetic sand tables and single-line
//! plotters.
//!
//! Everything in here draws into one [`path::PointPath`]: lines, spirals,
//! circular loops and text all continue from wherever the previous operation
//! left the pen, because the machines this is for can't lift it. When the
//! drawing is done it can be exported as an SVG preview or as a THR file of
//! cumulative (theta, rho) pairs for a sand table.
//!
//! ```
//! use std::sync::Arc;
//! use sandstroke::prelude::*;
//!
//! let renderer = GlyphRenderer::new(Arc::new(GlyphTable::block_capitals()));
//! let mut path = PointPath::new(0.0, 0.0);
//! path.spiral_out(100.0, 20.0, 0.0);
//! TextBlockLayout::new(&renderer)
//!     .add_lines_of_text(&mut path, &[LineConfig::new("SAND").scale(20.0)], 1.4)
//!     .expect("SAND fits in a circle of radius 100");
//! path.outer_loop(2.0, 0.0);
//! let thr = path.to_thr(&ThrOptions::default());
//! assert_eq!(thr.lines().count(), path.len());
//! ```

/// Typed errors for stroke generation.
pub mod errors;

/// The point buffer, plus the line, spiral and loop generators that draw
/// into it.
pub mod path;

/// Glyph data, text rendering and text block layout.
pub mod glyphs;

/// SVG and THR exporters.
pub mod export;

/// Make your life easy! Just import prelude::* and get drawing.
pub mod prelude {
    pub use crate::errors::{StrokeError, UnsupportedKind};
    pub use crate::export::svg::{SvgOptions, SvgStyle, ToSvg};
    pub use crate::export::thr::{PolarPoint, ThrOptions, ToThr};
    pub use crate::glyphs::layout::{LineConfig, TextBlock, TextBlockLayout};
    pub use crate::glyphs::renderer::{GlyphRenderer, TextMetrics, TextStyle};
    pub use crate::glyphs::{GlyphDefinition, GlyphLookup, GlyphSource, GlyphTable};
    pub use crate::path::line::LineSegmenter;
    pub use crate::path::polar::PolarPathGenerator;
    pub use crate::path::PointPath;
}
