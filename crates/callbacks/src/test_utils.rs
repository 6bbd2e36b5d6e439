use ndarray::{Array2, ArrayView2, Axis};
use thiserror::Error;

use surrox_core::Surrogate;

/// Analytic surrogate: mean `Σ (xᵢ - cᵢ)²`, variance `0.1 Σ xᵢ²`.
#[derive(Debug, Clone)]
pub(crate) struct Paraboloid {
    center: Vec<f64>,
}

impl Paraboloid {
    pub(crate) fn new(center: Vec<f64>) -> Self {
        Self { center }
    }
}

#[derive(Debug, Error)]
#[error("surrogate not trained")]
pub(crate) struct NotTrained;

impl Surrogate for Paraboloid {
    type Error = NotTrained;

    fn nx(&self) -> usize {
        self.center.len()
    }

    fn predict_values(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        let y = x.map_axis(Axis(1), |row| {
            row.iter()
                .zip(&self.center)
                .map(|(xi, ci)| (xi - ci).powi(2))
                .sum::<f64>()
        });
        Ok(y.insert_axis(Axis(1)))
    }

    fn predict_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        let c = self.center[kx];
        Ok(x.column(kx).mapv(|xk| 2.0 * (xk - c)).insert_axis(Axis(1)))
    }

    fn predict_variances(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        let v = x.map_axis(Axis(1), |row| 0.1 * row.dot(&row));
        Ok(v.insert_axis(Axis(1)))
    }

    fn predict_variance_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Ok(x.column(kx).mapv(|xk| 0.2 * xk).insert_axis(Axis(1)))
    }
}

/// A surrogate whose every query fails.
pub(crate) struct Unavailable {
    pub(crate) nx: usize,
}

impl Surrogate for Unavailable {
    type Error = NotTrained;

    fn nx(&self) -> usize {
        self.nx
    }

    fn predict_values(&self, _x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Err(NotTrained)
    }

    fn predict_derivatives(
        &self,
        _x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Err(NotTrained)
    }

    fn predict_variances(&self, _x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Err(NotTrained)
    }

    fn predict_variance_derivatives(
        &self,
        _x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Err(NotTrained)
    }
}

/// A one-input surrogate that returns rows where columns are expected.
pub(crate) struct WrongShape;

impl Surrogate for WrongShape {
    type Error = NotTrained;

    fn nx(&self) -> usize {
        1
    }

    fn predict_values(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Ok(Array2::zeros((x.nrows(), 2)))
    }

    fn predict_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Ok(Array2::zeros((x.nrows(), 2)))
    }

    fn predict_variances(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Ok(Array2::zeros((x.nrows(), 2)))
    }

    fn predict_variance_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Ok(Array2::zeros((x.nrows(), 2)))
    }
}
