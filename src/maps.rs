use crate::affine::AffineMap;
use crate::error::{Error, Result};

/// An ordered set of affine maps, each with a selection probability.
///
/// Construction builds the cumulative-probability table used for
/// inverse-CDF sampling; the set is immutable afterwards. The probability
/// sum is checked for exact floating equality with 1, matching the
/// reference behavior (see DESIGN.md).
#[derive(Debug, Clone)]
pub struct WeightedMapSet {
    maps: Vec<AffineMap>,
    cumulative: Vec<f64>,
}

impl WeightedMapSet {
    pub fn new(maps: Vec<AffineMap>, probabilities: &[f64]) -> Result<Self> {
        if maps.len() != probabilities.len() {
            return Err(Error::InvalidConfiguration(format!(
                "got {} maps but {} probabilities",
                maps.len(),
                probabilities.len()
            )));
        }
        if maps.is_empty() {
            return Err(Error::InvalidConfiguration(
                "map set must not be empty".into(),
            ));
        }
        let total: f64 = probabilities.iter().sum();
        if total != 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "probabilities sum to {total}, not 1"
            )));
        }

        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut running = 0.0;
        for p in probabilities {
            running += p;
            cumulative.push(running);
        }

        Ok(WeightedMapSet { maps, cumulative })
    }

    /// The classic Barnsley fern: stem, main frond, and the two leaflet
    /// maps, with their standard selection probabilities.
    pub fn barnsley_fern() -> Self {
        let maps = vec![
            AffineMap::from_coefficients([0.0, 0.0, 0.0, 0.16, 0.0, 0.0]),
            AffineMap::from_coefficients([0.85, 0.04, -0.04, 0.85, 0.0, 1.60]),
            AffineMap::from_coefficients([0.20, -0.26, 0.23, 0.22, 0.0, 1.60]),
            AffineMap::from_coefficients([-0.15, 0.28, 0.26, 0.24, 0.0, 0.44]),
        ];
        WeightedMapSet::new(maps, &[0.01, 0.85, 0.07, 0.07])
            .expect("fern preset probabilities sum to 1")
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn map(&self, index: usize) -> &AffineMap {
        &self.maps[index]
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Resolves a uniform draw in `[0, 1)` to a map index: the smallest `j`
    /// with `draw < cumulative[j]`. Draws at or beyond the final cumulative
    /// entry clamp to the last map.
    pub fn resolve(&self, draw: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&c| draw < c)
            .unwrap_or(self.maps.len() - 1)
    }
}
