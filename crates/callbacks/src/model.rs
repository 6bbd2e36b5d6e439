use ndarray::{Array2, ArrayView2, Axis};
use thiserror::Error;

use surrox_core::Surrogate;

use crate::OutputKind;

/// Errors that can occur when querying a [`SurrogateModel`].
#[derive(Debug, Error)]
pub enum SurrogateError<E> {
    #[error("surrogate has no input dimensions")]
    ZeroDimension,

    #[error("expected {expected} input column(s), got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("input has no rows")]
    EmptyInput,

    #[error("missing argument {0}")]
    MissingArgument(usize),

    #[error("`{operation}` returned shape {found:?}, expected {expected:?}")]
    UnexpectedShape {
        operation: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("surrogate failed")]
    Surrogate(#[source] E),
}

/// A trained surrogate with validated queries.
///
/// All queries take a sample matrix of shape `(n, nx)`. Values and variances
/// come back as `(n, 1)` columns. Gradients come back as `(n, nx)` matrices
/// whose row `i` is the gradient at sample `i`, assembled from one
/// per-direction query for each input.
#[derive(Debug, Clone)]
pub struct SurrogateModel<S> {
    surrogate: S,
}

impl<S: Surrogate> SurrogateModel<S> {
    /// Wraps a trained surrogate.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::ZeroDimension`] if the surrogate reports
    /// zero inputs.
    pub fn new(surrogate: S) -> Result<Self, SurrogateError<S::Error>> {
        if surrogate.nx() == 0 {
            return Err(SurrogateError::ZeroDimension);
        }
        Ok(Self { surrogate })
    }

    /// Returns the number of input variables.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.surrogate.nx()
    }

    /// Returns the wrapped surrogate.
    #[must_use]
    pub fn surrogate(&self) -> &S {
        &self.surrogate
    }

    /// Consumes the wrapper and returns the surrogate.
    pub fn into_inner(self) -> S {
        self.surrogate
    }

    /// Predicts the mean at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        let n = self.check_input(x)?;
        let y = self
            .surrogate
            .predict_values(x)
            .map_err(SurrogateError::Surrogate)?;
        check_column("predict_values", &y, n)?;
        Ok(y)
    }

    /// Predicts the gradient of the mean at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn predict_derivative(
        &self,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        self.stack_directions(x, "predict_derivatives", |x, kx| {
            self.surrogate.predict_derivatives(x, kx)
        })
    }

    /// Predicts the variance at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn predict_variance(
        &self,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        let n = self.check_input(x)?;
        let v = self
            .surrogate
            .predict_variances(x)
            .map_err(SurrogateError::Surrogate)?;
        check_column("predict_variances", &v, n)?;
        Ok(v)
    }

    /// Predicts the gradient of the variance at each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn predict_variance_derivative(
        &self,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        self.stack_directions(x, "predict_variance_derivatives", |x, kx| {
            self.surrogate.predict_variance_derivatives(x, kx)
        })
    }

    /// Predicts the output selected by `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn output(
        &self,
        kind: OutputKind,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        match kind {
            OutputKind::Predict => self.predict(x),
            OutputKind::Variance => self.predict_variance(x),
        }
    }

    /// Predicts the gradient of the output selected by `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong shape or the surrogate fails.
    pub fn output_gradient(
        &self,
        kind: OutputKind,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        match kind {
            OutputKind::Predict => self.predict_derivative(x),
            OutputKind::Variance => self.predict_variance_derivative(x),
        }
    }

    /// Predicts the output selected by `kind` at a single point.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has the wrong length or the surrogate fails.
    pub fn output_at(&self, kind: OutputKind, x: &[f64]) -> Result<f64, SurrogateError<S::Error>> {
        let row = ArrayView2::from_shape((1, x.len()), x).map_err(|_| {
            SurrogateError::DimensionMismatch {
                expected: self.nx(),
                found: x.len(),
            }
        })?;
        Ok(self.output(kind, row)?[[0, 0]])
    }

    fn check_input(&self, x: ArrayView2<'_, f64>) -> Result<usize, SurrogateError<S::Error>> {
        let (n, cols) = x.dim();
        if cols != self.nx() {
            return Err(SurrogateError::DimensionMismatch {
                expected: self.nx(),
                found: cols,
            });
        }
        if n == 0 {
            return Err(SurrogateError::EmptyInput);
        }
        Ok(n)
    }

    /// Queries `direction` once per input and stacks the columns.
    fn stack_directions<F>(
        &self,
        x: ArrayView2<'_, f64>,
        operation: &'static str,
        direction: F,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>>
    where
        F: Fn(ArrayView2<'_, f64>, usize) -> Result<Array2<f64>, S::Error>,
    {
        let n = self.check_input(x)?;
        let mut gradient = Array2::zeros((n, self.nx()));
        for (kx, mut column) in gradient.axis_iter_mut(Axis(1)).enumerate() {
            let d = direction(x, kx).map_err(SurrogateError::Surrogate)?;
            check_column(operation, &d, n)?;
            column.assign(&d.column(0));
        }
        Ok(gradient)
    }
}

fn check_column<E>(
    operation: &'static str,
    y: &Array2<f64>,
    n: usize,
) -> Result<(), SurrogateError<E>> {
    if y.dim() == (n, 1) {
        Ok(())
    } else {
        Err(SurrogateError::UnexpectedShape {
            operation,
            expected: (n, 1),
            found: y.dim(),
        })
    }
}
