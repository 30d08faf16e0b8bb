//! The named point transforms ("variations") and their convex combinator.
//!
//! Each variation maps a Cartesian point `(x, y)` — with polar helpers
//! `r = sqrt(x² + y²)` and `θ = atan2(x, y)` — to a new point. Formulas
//! that divide by `r` add a small tolerance to the denominator instead of
//! failing near the origin.

use crate::error::{Error, Result};
use crate::Point;

use std::f64::consts::PI;

/// Added to denominators that would otherwise hit zero at the origin.
const DIV_TOL: f64 = 1e-12;

/// The closed registry of implemented variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    Linear,
    Handkerchief,
    Swirl,
    Disc,
    Sinusoidal,
    Horseshoe,
    Polar,
    Spiral,
    Hyperbolic,
    Diamond,
    Ex,
    Fisheye,
    Exponential,
    Cosine,
    Bubble,
}

impl Variation {
    pub const ALL: [Variation; 15] = [
        Variation::Linear,
        Variation::Handkerchief,
        Variation::Swirl,
        Variation::Disc,
        Variation::Sinusoidal,
        Variation::Horseshoe,
        Variation::Polar,
        Variation::Spiral,
        Variation::Hyperbolic,
        Variation::Diamond,
        Variation::Ex,
        Variation::Fisheye,
        Variation::Exponential,
        Variation::Cosine,
        Variation::Bubble,
    ];

    /// Looks a variation up by its registry name. Unknown names are a
    /// configuration error, matching the closed-registry contract.
    pub fn from_name(name: &str) -> Result<Self> {
        Variation::ALL
            .iter()
            .copied()
            .find(|v| v.name() == name)
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!("unknown variation {name:?}"))
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variation::Linear => "linear",
            Variation::Handkerchief => "handkerchief",
            Variation::Swirl => "swirl",
            Variation::Disc => "disc",
            Variation::Sinusoidal => "sinusoidal",
            Variation::Horseshoe => "horseshoe",
            Variation::Polar => "polar",
            Variation::Spiral => "spiral",
            Variation::Hyperbolic => "hyperbolic",
            Variation::Diamond => "diamond",
            Variation::Ex => "ex",
            Variation::Fisheye => "fisheye",
            Variation::Exponential => "exponential",
            Variation::Cosine => "cosine",
            Variation::Bubble => "bubble",
        }
    }

    pub fn apply(&self, (x, y): Point) -> Point {
        let r = (x * x + y * y).sqrt();
        let theta = x.atan2(y);

        match self {
            Variation::Linear => (x, y),
            Variation::Handkerchief => ((theta + r).sin() * r, (theta - r).cos() * r),
            Variation::Swirl => {
                let r2 = r * r;
                (x * r2.sin() - y * r2.cos(), x * r2.cos() + y * r2.sin())
            }
            Variation::Disc => ((theta / PI) * (PI * r).sin(), (theta / PI) * (PI * r).cos()),
            Variation::Sinusoidal => (x.sin(), y.sin()),
            Variation::Horseshoe => {
                let inv = 1.0 / (r + DIV_TOL);
                (inv * (x - y) * (x + y), inv * 2.0 * x * y)
            }
            Variation::Polar => (theta, r - 1.0),
            Variation::Spiral => {
                let inv = 1.0 / (r + DIV_TOL);
                (inv * (theta.cos() + r.sin()), inv * (theta.sin() - r.cos()))
            }
            Variation::Hyperbolic => (theta.sin() / (r + DIV_TOL), r * theta.cos()),
            Variation::Diamond => (theta.sin() * r.cos(), theta.cos() * r.sin()),
            Variation::Ex => {
                let p0 = (theta + r).sin();
                let p1 = (theta - r).cos();
                (
                    r * (p0.powi(3) + p1.powi(3)),
                    r * (p0.powi(3) - p1.powi(3)),
                )
            }
            Variation::Fisheye => {
                let scale = 2.0 / (r + 1.0);
                (scale * y, scale * x)
            }
            Variation::Exponential => {
                let e = (x - 1.0).exp();
                (e * (PI * y).cos(), e * (PI * y).sin())
            }
            Variation::Cosine => ((PI * x).cos() * y.cosh(), -(PI * x).sin() * y.sinh()),
            Variation::Bubble => {
                let scale = 4.0 / (r * r + 4.0);
                (scale * x, scale * y)
            }
        }
    }

    pub fn apply_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// A convex combination of variations applied to the same input point.
///
/// Weights must sum to exactly 1, the same strict equality the map-set
/// probabilities use.
#[derive(Debug, Clone)]
pub struct Blend {
    terms: Vec<(Variation, f64)>,
}

impl Blend {
    pub fn new(terms: Vec<(Variation, f64)>) -> Result<Self> {
        let total: f64 = terms.iter().map(|(_, w)| w).sum();
        if total != 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "blend weights sum to {total}, not 1"
            )));
        }
        Ok(Blend { terms })
    }

    /// Builds a blend from `(name, weight)` pairs, rejecting unknown names.
    pub fn named(terms: &[(&str, f64)]) -> Result<Self> {
        let terms = terms
            .iter()
            .map(|&(name, w)| Ok((Variation::from_name(name)?, w)))
            .collect::<Result<Vec<_>>>()?;
        Blend::new(terms)
    }

    pub fn apply(&self, point: Point) -> Point {
        let mut out = (0.0, 0.0);
        for (variation, w) in &self.terms {
            let (u, v) = variation.apply(point);
            out.0 += u * w;
            out.1 += v * w;
        }
        out
    }

    pub fn apply_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// Scales a point cloud into the unit box by its largest absolute
/// coordinate; clouds already inside the box are returned unchanged.
pub fn normalize(points: &[Point]) -> Vec<Point> {
    let max = points
        .iter()
        .flat_map(|&(x, y)| [x.abs(), y.abs()])
        .fold(0.0, f64::max);
    if max > 1.0 {
        points.iter().map(|&(x, y)| (x / max, y / max)).collect()
    } else {
        points.to_vec()
    }
}
