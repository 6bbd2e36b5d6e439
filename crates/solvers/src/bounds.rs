//! Box bounds and the smooth change of variables that enforces them.
//!
//! Quasi-Newton methods such as L-BFGS search an unconstrained space. To keep
//! every trial point feasible, the solver optimizes over `z ∈ ℝⁿ` and maps each
//! coordinate into its bounds:
//!
//! | bounds        | map                          | dx/dz          |
//! |---------------|------------------------------|----------------|
//! | `[lo, hi]`    | `lo + (hi - lo) · σ(z)`      | `(hi - lo) σ (1 - σ)` |
//! | `[lo, ∞)`     | `lo + softplus(z)`           | `σ(z)`         |
//! | `(-∞, hi]`    | `hi - softplus(-z)`          | `σ(-z)`        |
//! | `(-∞, ∞)`     | `z`                          | `1`            |
//!
//! where `σ` is the logistic function.

use thiserror::Error;

/// Smallest distance kept between a mapped starting point and its bounds.
const EDGE: f64 = 1e-9;

/// Per-variable lower and upper bounds.
///
/// Either side may be infinite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds"))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Errors that can occur when validating bounds.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("lower has {lower} entries but upper has {upper}")]
    LengthMismatch { lower: usize, upper: usize },

    #[error("bound {index} is NaN")]
    NotANumber { index: usize },

    #[error("bound {index}: lower {lower} must be less than upper {upper}")]
    Inverted { index: usize, lower: f64, upper: f64 },
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Free,
    Lower(f64),
    Upper(f64),
    Both(f64, f64),
}

impl Bounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ, any bound is NaN, or any lower
    /// bound is not strictly less than its upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(BoundsError::NotANumber { index });
            }
            if lo >= hi {
                return Err(BoundsError::Inverted {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates bounds for a single variable.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is NaN or `lower >= upper`.
    pub fn interval(lower: f64, upper: f64) -> Result<Self, BoundsError> {
        Self::new(vec![lower], vec![upper])
    }

    /// Creates bounds that leave `n` variables free.
    #[must_use]
    pub fn unbounded(n: usize) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; n],
            upper: vec![f64::INFINITY; n],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `true` if `x` has the right length and lies within the bounds.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&xi, (&lo, &hi))| lo <= xi && xi <= hi)
    }

    /// Maps an unconstrained point into the bounds.
    ///
    /// # Panics
    ///
    /// Panics if `z` has more entries than the bounds.
    #[must_use]
    pub fn to_bounded(&self, z: &[f64]) -> Vec<f64> {
        z.iter()
            .enumerate()
            .map(|(i, &zi)| match self.side(i) {
                Side::Free => zi,
                Side::Lower(lo) => lo + softplus(zi),
                Side::Upper(hi) => hi - softplus(-zi),
                Side::Both(lo, hi) => lo + (hi - lo) * sigmoid(zi),
            })
            .collect()
    }

    /// Maps a bounded point into the unconstrained space.
    ///
    /// Points on or outside a finite bound are first pulled just inside it,
    /// so the result is always finite.
    ///
    /// # Panics
    ///
    /// Panics if `x` has more entries than the bounds.
    #[must_use]
    pub fn to_unbounded(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .enumerate()
            .map(|(i, &xi)| match self.side(i) {
                Side::Free => xi,
                Side::Lower(lo) => softplus_inv((xi - lo).max(EDGE)),
                Side::Upper(hi) => -softplus_inv((hi - xi).max(EDGE)),
                Side::Both(lo, hi) => {
                    let t = ((xi - lo) / (hi - lo)).clamp(EDGE, 1.0 - EDGE);
                    (t / (1.0 - t)).ln()
                }
            })
            .collect()
    }

    /// Converts a gradient with respect to `x` into one with respect to `z`.
    ///
    /// # Panics
    ///
    /// Panics if `z` has more entries than the bounds.
    #[must_use]
    pub fn scale_gradient(&self, z: &[f64], grad_x: &[f64]) -> Vec<f64> {
        z.iter()
            .zip(grad_x)
            .enumerate()
            .map(|(i, (&zi, &gi))| {
                let dx_dz = match self.side(i) {
                    Side::Free => 1.0,
                    Side::Lower(_) => sigmoid(zi),
                    Side::Upper(_) => sigmoid(-zi),
                    Side::Both(lo, hi) => {
                        let s = sigmoid(zi);
                        (hi - lo) * s * (1.0 - s)
                    }
                };
                gi * dx_dz
            })
            .collect()
    }

    /// Classifies variable `i`; out of range is a caller bug.
    fn side(&self, i: usize) -> Side {
        let (lo, hi) = (self.lower[i], self.upper[i]);
        match (lo.is_finite(), hi.is_finite()) {
            (false, false) => Side::Free,
            (true, false) => Side::Lower(lo),
            (false, true) => Side::Upper(hi),
            (true, true) => Side::Both(lo, hi),
        }
    }
}

/// Logistic function, evaluated without overflow for either sign of `z`.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + eᶻ)`, with `z` returned directly once `e⁻ᶻ` is negligible.
fn softplus(z: f64) -> f64 {
    if z > 20.0 { z } else { z.exp().ln_1p() }
}

/// Inverse of [`softplus`] on `(0, ∞)`.
fn softplus_inv(y: f64) -> f64 {
    if y > 20.0 { y } else { y.exp_m1().ln() }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for Bounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}
