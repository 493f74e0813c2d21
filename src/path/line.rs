use log::debug;

use super::PointPath;

/// Longest segment [`LineSegmenter::add_line`] will emit.
pub const DEFAULT_MAX_SEGMENT_LENGTH: f64 = 1.0;

/// Straight lines from the pen position, chopped into segments no longer
/// than a maximum length so the point density is independent of the line
/// length.
///
/// Angles are in degrees, counter-clockwise from the +x axis. A negative
/// length draws in the opposite direction.
///
/// # Example
///
/// ```
/// use sandstroke::path::PointPath;
/// use sandstroke::path::line::LineSegmenter;
///
/// let mut path = PointPath::new(0.0, 0.0);
/// path.add_line(10.0, 0.0).add_line(-5.0, 90.0);
/// assert_eq!(path.current_point().x, 10.0);
/// assert_eq!(path.current_point().y, -5.0);
/// ```
pub trait LineSegmenter {
    fn add_segmented_line(
        &mut self,
        length: f64,
        angle_degrees: f64,
        max_segment_length: f64,
    ) -> &mut Self;

    fn add_line(&mut self, length: f64, angle_degrees: f64) -> &mut Self {
        self.add_segmented_line(length, angle_degrees, DEFAULT_MAX_SEGMENT_LENGTH)
    }
}

impl LineSegmenter for PointPath {
    fn add_segmented_line(
        &mut self,
        length: f64,
        angle_degrees: f64,
        max_segment_length: f64,
    ) -> &mut Self {
        let segments = (length.abs() / max_segment_length).ceil();
        if !segments.is_finite() || segments < 1.0 {
            return self;
        }
        let mut angle = angle_degrees.to_radians();
        if length < 0.0 {
            angle += std::f64::consts::PI;
        }
        let length = length.abs();
        let step = length / segments;
        debug!(
            "Generating line of length {} at {} degrees with {} segments",
            length, angle_degrees, segments
        );

        let start = self.current_point();
        let (sin, cos) = angle.sin_cos();
        for i in 1..=(segments as usize) {
            let travel = step * i as f64;
            self.add_point(start.x + travel * cos, start.y + travel * sin);
        }
        self
    }
}
