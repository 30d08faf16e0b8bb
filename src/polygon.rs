use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{Error, Result};
use crate::Point;

/// Tolerance for accepting a fractional corner count as integral, so that
/// e.g. `4.0` passes while `4.01` fails.
const INTEGRAL_TOL: f64 = 1e-9;

/// A regular polygon with `n` corners on the unit circle.
///
/// Corner `k` sits at `(sin(2πk/n), cos(2πk/n))`, so corner 0 is at the
/// top and the corners run clockwise.
#[derive(Debug, Clone)]
pub struct Polygon {
    corners: Vec<Point>,
}

impl Polygon {
    /// Builds an `n`-gon. The count is taken as a float so that integral
    /// values like `4.0` are accepted; anything fractional or below 3 is
    /// rejected.
    pub fn new(n: f64) -> Result<Self> {
        if (n - n.round()).abs() > INTEGRAL_TOL {
            return Err(Error::InvalidConfiguration(format!(
                "corner count must be an integer, got {n}"
            )));
        }
        let n = n.round();
        if n < 3.0 {
            return Err(Error::InvalidConfiguration(format!(
                "corner count must be at least 3, got {n}"
            )));
        }
        let n = n as usize;

        let corners = (0..n)
            .map(|k| {
                let angle = TAU * k as f64 / n as f64;
                (angle.sin(), angle.cos())
            })
            .collect();

        Ok(Polygon { corners })
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Draws a uniform weight per corner, normalizes the weights to sum to
    /// 1, and returns the weighted combination of the corners. As a convex
    /// combination the result always lies inside the polygon.
    pub fn random_interior_point<R: Rng>(&self, rng: &mut R) -> Point {
        let mut weights: Vec<f64> = (0..self.corners.len()).map(|_| rng.gen::<f64>()).collect();
        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }

        let mut point = (0.0, 0.0);
        for (corner, w) in self.corners.iter().zip(&weights) {
            point.0 += corner.0 * w;
            point.1 += corner.1 * w;
        }
        point
    }
}
