//! The [`PointPath`] buffer every generator in this crate draws into.
//!
//! A path is one continuous stroke: an ordered list of points, created with
//! an explicit start point and only ever appended to. The cursor is always
//! the last stored point, so every add-operation starts where the previous
//! one stopped.
use geo_types::{coord, Coord, LineString};
use log::trace;

/// Straight line generation, subdivided into short segments.
pub mod line;

/// Spirals and constant-radius loops, generated at a fixed angular step.
pub mod polar;

/// Number of decimals every stored coordinate is rounded to.
pub const PRECISION: i32 = 3;

/// Round a coordinate value to [`PRECISION`] decimals.
pub fn round_coord(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    (value * factor).round() / factor
}

/// # PointPath
///
/// Owns the ordered point buffer and the pen position. Consecutive points
/// are never equal after rounding, which keeps every segment non-degenerate
/// for the angle calculations done downstream.
///
/// # Example
///
/// ```
/// use sandstroke::path::PointPath;
///
/// let mut path = PointPath::new(0.0, 0.0);
/// path.add_point(1.0001, 2.0);
/// path.add_point(1.0, 2.0); // same point after rounding, dropped
/// assert_eq!(path.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointPath {
    points: Vec<Coord<f64>>,
    cursor: Coord<f64>,
}

impl PointPath {
    /// Start a new path at (x, y).
    pub fn new(x: f64, y: f64) -> PointPath {
        let start = coord! {x: round_coord(x), y: round_coord(y)};
        PointPath {
            points: vec![start],
            cursor: start,
        }
    }

    /// Append (x, y) after rounding. A point equal to the current one is
    /// dropped.
    pub fn add_point(&mut self, x: f64, y: f64) -> &mut Self {
        let next = coord! {x: round_coord(x), y: round_coord(y)};
        if next == self.cursor {
            return self;
        }
        trace!("Added point: ({}, {})", next.x, next.y);
        self.points.push(next);
        self.cursor = next;
        self
    }

    /// The pen position, i.e. the most recently stored point.
    pub fn current_point(&self) -> Coord<f64> {
        self.cursor
    }

    /// Distance of the pen from the origin.
    pub fn radius(&self) -> f64 {
        self.cursor.x.hypot(self.cursor.y)
    }

    /// Angle of the pen around the origin, in degrees within (-180, 180].
    pub fn angle_degrees(&self) -> f64 {
        self.cursor.y.atan2(self.cursor.x).to_degrees()
    }

    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a path holds at least its start point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(self.points.clone())
    }
}

impl From<PointPath> for LineString<f64> {
    fn from(path: PointPath) -> Self {
        LineString::new(path.points)
    }
}
