use ndarray::{Array2, ArrayView2};

/// A trained regression surrogate.
///
/// This is the seam onto the external library that owns the surrogate math
/// (for example, a Kriging model). A surrogate is constructed and trained
/// elsewhere, then queried repeatedly through these methods.
///
/// Inputs are sample matrices of shape `(n, nx)`, one row per point, where
/// `nx` is the fixed input dimensionality returned by [`Surrogate::nx`].
/// Every method returns a column of shape `(n, 1)`.
///
/// Derivatives are queried one input direction at a time, matching the
/// per-direction APIs that Kriging libraries commonly expose.
pub trait Surrogate {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the number of input variables.
    fn nx(&self) -> usize;

    /// Predicts the mean output at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model cannot produce a prediction.
    fn predict_values(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error>;

    /// Predicts the partial derivative of the mean along input `kx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model cannot produce a derivative.
    fn predict_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error>;

    /// Predicts the variance of the output at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model cannot produce a variance.
    fn predict_variances(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error>;

    /// Predicts the partial derivative of the variance along input `kx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model cannot produce a derivative.
    fn predict_variance_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error>;
}
