//! Chaos-game and iterated-function-system point generation.
//!
//! The crate centers on [`Attractor`], a stochastic point iterator with two
//! rules (move-toward-a-polygon-corner, or apply a weighted affine map) and
//! two interchangeable loop kernels. Both kernels consume the same batch of
//! random draws, so swapping one for the other never changes the output.
//! Rendering lives in the binaries; the library only produces points,
//! choice indices and color traces.

pub mod affine;
pub mod attractor;
pub mod color;
pub mod error;
pub mod maps;
pub mod polygon;
pub mod variations;

pub use affine::AffineMap;
pub use attractor::{Attractor, Kernel, Rule, DEFAULT_DISCARD};
pub use error::{Error, Result};
pub use maps::WeightedMapSet;
pub use polygon::Polygon;
pub use variations::{Blend, Variation};

/// A 2D point, `(x, y)`.
pub type Point = (f64, f64);
