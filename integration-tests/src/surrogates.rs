use std::convert::Infallible;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use thiserror::Error;

use surrox_core::Surrogate;

/// A Gaussian bump with closed-form mean, variance, and derivatives.
///
/// - mean: `height · exp(-r² / (2 w²))`
/// - variance: `floor + spread · r²`
///
/// where `r` is the distance from `center` and `w` is `width`. Both peak
/// (or bottom out) at `center`.
#[derive(Debug, Clone)]
pub struct Bump {
    pub center: Vec<f64>,
    pub height: f64,
    pub width: f64,
    pub floor: f64,
    pub spread: f64,
}

impl Bump {
    /// A 1-D bump that peaks at 1.5 when x = 2.
    #[must_use]
    pub fn peak_at_two() -> Self {
        Self {
            center: vec![2.0],
            height: 1.5,
            width: 1.0,
            floor: 0.01,
            spread: 0.2,
        }
    }

    fn r2(&self, row: ArrayView1<'_, f64>) -> f64 {
        row.iter()
            .zip(&self.center)
            .map(|(x, c)| (x - c).powi(2))
            .sum()
    }

    fn mean(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.height * (-self.r2(row) / (2.0 * self.width.powi(2))).exp()
    }

    fn per_row(&self, x: ArrayView2<'_, f64>, f: impl Fn(ArrayView1<'_, f64>) -> f64) -> Array2<f64> {
        x.rows()
            .into_iter()
            .map(f)
            .collect::<Array1<f64>>()
            .insert_axis(Axis(1))
    }
}

impl Surrogate for Bump {
    type Error = Infallible;

    fn nx(&self) -> usize {
        self.center.len()
    }

    fn predict_values(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Ok(self.per_row(x, |row| self.mean(row)))
    }

    fn predict_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Ok(self.per_row(x, |row| {
            -self.mean(row) * (row[kx] - self.center[kx]) / self.width.powi(2)
        }))
    }

    fn predict_variances(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Ok(self.per_row(x, |row| self.floor + self.spread * self.r2(row)))
    }

    fn predict_variance_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Ok(self.per_row(x, |row| {
            2.0 * self.spread * (row[kx] - self.center[kx])
        }))
    }
}

#[derive(Debug, Error)]
#[error("kriging backend offline")]
pub struct Offline;

/// A surrogate whose every query fails, as if its backend went away.
#[derive(Debug, Clone, Copy)]
pub struct Unreachable {
    pub nx: usize,
}

impl Surrogate for Unreachable {
    type Error = Offline;

    fn nx(&self) -> usize {
        self.nx
    }

    fn predict_values(&self, _x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Err(Offline)
    }

    fn predict_derivatives(
        &self,
        _x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Err(Offline)
    }

    fn predict_variances(&self, _x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        Err(Offline)
    }

    fn predict_variance_derivatives(
        &self,
        _x: ArrayView2<'_, f64>,
        _kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        Err(Offline)
    }
}
