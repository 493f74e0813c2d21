use log::debug;

use super::PointPath;

/// Archimedean spirals and constant-radius loops around the origin.
///
/// All three generators step at one point per degree of sweep rather than
/// per unit of arc length, so curvature stays smooth at any radius. Angles
/// are in degrees, counter-clockwise from the +x axis.
///
/// # Example
///
/// ```
/// use sandstroke::path::PointPath;
/// use sandstroke::path::polar::PolarPathGenerator;
///
/// let mut path = PointPath::new(0.0, 0.0);
/// path.spiral_out(100.0, 8.0, 180.0)
///     .outer_loop(2.0, 0.0)
///     .spiral_in(8.0);
/// assert_eq!(path.current_point().x, 0.0);
/// assert_eq!(path.current_point().y, 0.0);
/// ```
pub trait PolarPathGenerator {
    /// Spiral from the origin out to `radius`, winding `turns` times and
    /// finishing at `ending_angle`.
    fn spiral_out(&mut self, radius: f64, turns: f64, ending_angle: f64) -> &mut Self;

    /// Spiral from the pen position back into the origin, winding `turns`
    /// times on the way.
    fn spiral_in(&mut self, turns: f64) -> &mut Self;

    /// Circle at the pen's radius until `ending_angle` is reached, after
    /// `turns` additional full revolutions.
    fn outer_loop(&mut self, turns: f64, ending_angle: f64) -> &mut Self;
}

/// Sweeps closer than this to a whole degree count are treated as whole.
const ANGLE_TOLERANCE: f64 = 1e-9;

fn polar_point(path: &mut PointPath, radius: f64, degrees: f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    path.add_point(radius * cos, radius * sin);
}

impl PolarPathGenerator for PointPath {
    fn spiral_out(&mut self, radius: f64, turns: f64, ending_angle: f64) -> &mut Self {
        debug!(
            "Generating spiral out: radius={}, turns={}, end_angle={}",
            radius, turns, ending_angle
        );
        let total_degrees = turns * 360.0 + ending_angle;
        if total_degrees <= 0.0 {
            self.add_point(0.0, 0.0);
            return self;
        }
        for i in 0..=(total_degrees.floor() as usize) {
            let degrees = i as f64;
            polar_point(self, radius * (degrees / total_degrees), degrees);
        }
        self
    }

    fn spiral_in(&mut self, turns: f64) -> &mut Self {
        let radius = self.radius();
        let start_angle = self.angle_degrees();
        debug!(
            "Generating spiral in: radius={:.2}, turns={}, start_angle={:.2}",
            radius, turns, start_angle
        );
        let total_degrees = turns * 360.0 + start_angle;
        if total_degrees <= 0.0 {
            self.add_point(0.0, 0.0);
            return self;
        }
        for i in (0..=(total_degrees.floor() as usize)).rev() {
            let degrees = i as f64;
            polar_point(self, radius * (degrees / total_degrees), degrees);
        }
        self
    }

    fn outer_loop(&mut self, turns: f64, ending_angle: f64) -> &mut Self {
        let radius = self.radius();
        let start_angle = self.angle_degrees();
        debug!(
            "Starting outer loop: radius={:.2}, start_angle={:.2}",
            radius, start_angle
        );
        let mut sweep = (ending_angle - start_angle).rem_euclid(360.0);
        if 360.0 - sweep < ANGLE_TOLERANCE {
            sweep = 0.0;
        }
        let total_degrees = turns * 360.0 + sweep;
        if total_degrees <= 0.0 {
            return self;
        }
        let whole = total_degrees.floor();
        for i in 1..=(whole as usize) {
            polar_point(self, radius, start_angle + i as f64);
        }
        // Land exactly on the requested angle when the sweep isn't whole degrees.
        if total_degrees - whole > ANGLE_TOLERANCE {
            polar_point(self, radius, start_angle + total_degrees);
        }
        debug!("Outer loop finished at: {:?}", self.current_point());
        self
    }
}
