use std::convert::Infallible;

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

use surrox_core::{Differentiable, Function, Sparsity};

#[derive(Debug, Error)]
#[error("quadratic is undefined at x = {0}")]
pub(crate) struct Undefined(pub(crate) f64);

/// f(x) = offset + scale · Σ (xᵢ - cᵢ)², optionally undefined past a limit.
#[derive(Debug, Clone)]
pub(crate) struct Quadratic {
    pub(crate) center: Vec<f64>,
    pub(crate) scale: f64,
    pub(crate) offset: f64,
    pub(crate) undefined_above: Option<f64>,
}

impl Quadratic {
    /// A bowl with its minimum of zero at `center`.
    pub(crate) fn bowl(center: Vec<f64>) -> Self {
        Self {
            center,
            scale: 1.0,
            offset: 0.0,
            undefined_above: None,
        }
    }

    /// The 1-D hill 1.5 - (x - 2)², with its maximum of 1.5 at x = 2.
    pub(crate) fn hill() -> Self {
        Self {
            center: vec![2.0],
            scale: -1.0,
            offset: 1.5,
            undefined_above: None,
        }
    }

    fn check(&self, x: &Array2<f64>) -> Result<(), Undefined> {
        match (self.undefined_above, x.iter().copied().reduce(f64::max)) {
            (Some(limit), Some(top)) if top > limit => Err(Undefined(top)),
            _ => Ok(()),
        }
    }
}

impl Function for Quadratic {
    type Error = Undefined;

    fn name(&self) -> &str {
        "quadratic"
    }

    fn n_in(&self) -> usize {
        1
    }

    fn n_out(&self) -> usize {
        1
    }

    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::dense(self.center.len(), 1))
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::scalar())
    }

    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
        self.check(&args[0])?;
        let sum: f64 = args[0]
            .iter()
            .zip(&self.center)
            .map(|(x, c)| (x - c).powi(2))
            .sum();
        Ok(vec![Array2::from_elem((1, 1), self.offset + self.scale * sum)])
    }
}

impl Differentiable for Quadratic {
    type Jacobian = QuadraticJacobian;

    fn jacobian(&self) -> Self::Jacobian {
        QuadraticJacobian(self.clone())
    }
}

pub(crate) struct QuadraticJacobian(Quadratic);

impl Function for QuadraticJacobian {
    type Error = Undefined;

    fn name(&self) -> &str {
        "jac_quadratic"
    }

    fn n_in(&self) -> usize {
        2
    }

    fn n_out(&self) -> usize {
        1
    }

    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        match i {
            0 => Some(Sparsity::dense(self.0.center.len(), 1)),
            1 => Some(Sparsity::scalar()),
            _ => None,
        }
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::dense(1, self.0.center.len()))
    }

    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
        self.0.check(&args[0])?;
        let row: Array1<f64> = args[0]
            .iter()
            .zip(&self.0.center)
            .map(|(x, c)| 2.0 * self.0.scale * (x - c))
            .collect();
        Ok(vec![row.insert_axis(Axis(0))])
    }
}

/// Takes a row instead of a column.
pub(crate) struct RowInput;

impl Function for RowInput {
    type Error = Infallible;

    fn name(&self) -> &str {
        "row_input"
    }

    fn n_in(&self) -> usize {
        1
    }

    fn n_out(&self) -> usize {
        1
    }

    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::dense(1, 2))
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::scalar())
    }

    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
        Ok(vec![Array2::from_elem((1, 1), args[0].sum())])
    }
}

impl Differentiable for RowInput {
    type Jacobian = Self;

    fn jacobian(&self) -> Self::Jacobian {
        Self
    }
}
