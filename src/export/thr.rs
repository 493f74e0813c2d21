use std::f64::consts::{PI, TAU};
use std::path::Path;

use anyhow::Result;
use geo_types::Coord;
use log::info;
use serde::{Deserialize, Serialize};

use crate::export::write_atomically;
use crate::path::PointPath;

/// THR export settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ThrOptions {
    /// Added to the largest radius before normalizing, so the outermost
    /// point stays clear of the table rim.
    pub extra_radius: f64,
}

impl Default for ThrOptions {
    fn default() -> Self {
        ThrOptions { extra_radius: 1.0 }
    }
}

/// A point in table coordinates: cumulative angle in radians, and distance
/// from the center as a fraction of the table radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub theta: f64,
    pub rho: f64,
}

/// Angle of a point in the table frame, which is rotated a quarter turn
/// from the usual math convention (theta = 0 points along -y).
pub fn table_theta(point: Coord<f64>) -> f64 {
    point.x.atan2(-point.y)
}

/// Continue `previous` to the equivalent of `raw` that is nearest to it, so
/// the angle accumulates across revolutions instead of wrapping.
pub fn unwrap_theta(previous: f64, raw: f64) -> f64 {
    let mut delta = raw - previous.rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    previous + delta
}

/// Convert points to normalized, unwrapped polar coordinates.
pub fn polar_points(points: &[Coord<f64>], extra_radius: f64) -> Vec<PolarPoint> {
    let max_distance = points
        .iter()
        .map(|c| c.x.hypot(c.y))
        .fold(0.0f64, f64::max)
        + extra_radius;
    let max_rho = if max_distance > 0.0 { max_distance } else { 1.0 };

    let mut polar: Vec<PolarPoint> = Vec::with_capacity(points.len());
    for point in points {
        let raw = table_theta(*point);
        let theta = match polar.last() {
            Some(previous) => unwrap_theta(previous.theta, raw),
            None => raw,
        };
        polar.push(PolarPoint {
            theta,
            rho: point.x.hypot(point.y) / max_rho,
        });
    }
    polar
}

/// Trait to convert a path into THR text, one `theta rho` record per point.
pub trait ToThr {
    fn to_polar(&self, options: &ThrOptions) -> Vec<PolarPoint>;

    fn to_thr(&self, options: &ThrOptions) -> String {
        self.to_polar(options)
            .iter()
            .map(|p| format!("{:.5} {:.5}", p.theta, p.rho))
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn save_thr(&self, path: &Path, options: &ThrOptions) -> Result<()> {
        write_atomically(path, &self.to_thr(options))?;
        info!("Saved THR to {}", path.display());
        Ok(())
    }
}

impl ToThr for PointPath {
    fn to_polar(&self, options: &ThrOptions) -> Vec<PolarPoint> {
        polar_points(self.points(), options.extra_radius)
    }
}

impl ToThr for [Coord<f64>] {
    fn to_polar(&self, options: &ThrOptions) -> Vec<PolarPoint> {
        polar_points(self, options.extra_radius)
    }
}
