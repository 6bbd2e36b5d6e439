use std::fmt;

use ndarray::{Array2, ArrayBase, Data, Ix2};

/// The dense shape of a callback input or output.
///
/// Every entry of a dense pattern is structurally nonzero, so the pattern is
/// fully described by its row and column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sparsity {
    rows: usize,
    cols: usize,
}

impl Sparsity {
    /// Creates a dense `rows × cols` pattern.
    #[must_use]
    pub const fn dense(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Creates a dense `1 × 1` pattern.
    #[must_use]
    pub const fn scalar() -> Self {
        Self::dense(1, 1)
    }

    /// Creates a dense pattern matching the shape of `array`.
    #[must_use]
    pub fn of<S: Data>(array: &ArrayBase<S, Ix2>) -> Self {
        let (rows, cols) = array.dim();
        Self::dense(rows, cols)
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn numel(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Returns `true` if `array` has exactly this shape.
    #[must_use]
    pub fn matches<S: Data>(&self, array: &ArrayBase<S, Ix2>) -> bool {
        array.dim() == self.shape()
    }

    /// Returns a zero matrix with this shape.
    #[must_use]
    pub fn zeros(&self) -> Array2<f64> {
        Array2::zeros(self.shape())
    }
}

impl fmt::Display for Sparsity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}
