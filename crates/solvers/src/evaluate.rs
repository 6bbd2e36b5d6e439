//! Single-point evaluation of value and Jacobian callbacks.

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

use surrox_core::{CallError, Function, call};

/// Errors that can occur when evaluating a callback at one point.
#[derive(Debug, Error)]
pub enum EvalError<E> {
    /// The callback rejected its arguments or failed to evaluate.
    #[error("callback call failed")]
    Call(#[source] CallError<E>),

    /// The callback returned no outputs or an output of the wrong size.
    #[error("`{name}` returned {found} value(s), expected {expected}")]
    Size {
        name: String,
        expected: usize,
        found: usize,
    },

    /// The callback returned NaN or an infinity.
    #[error("non-finite {quantity} at x = {x:?}")]
    NonFinite { quantity: &'static str, x: Vec<f64> },
}

/// Evaluates a scalar value callback at `x`.
///
/// # Errors
///
/// Returns an error if the call fails or the value is not a finite scalar.
pub fn objective<F>(function: &F, x: &[f64]) -> Result<f64, EvalError<F::Error>>
where
    F: Function + ?Sized,
{
    let outputs = call(function, &[column(x)]).map_err(EvalError::Call)?;
    let value = match outputs.first() {
        Some(y) if y.len() == 1 => y[[0, 0]],
        other => {
            return Err(EvalError::Size {
                name: function.name().to_owned(),
                expected: 1,
                found: other.map_or(0, Array2::len),
            });
        }
    };

    if !value.is_finite() {
        return Err(EvalError::NonFinite {
            quantity: "objective",
            x: x.to_vec(),
        });
    }
    Ok(value)
}

/// Evaluates a Jacobian callback at `x` with the nominal output `value`.
///
/// # Errors
///
/// Returns an error if the call fails or the gradient is not a finite row of
/// length `x.len()`.
pub fn gradient<J>(jacobian: &J, x: &[f64], value: f64) -> Result<Vec<f64>, EvalError<J::Error>>
where
    J: Function + ?Sized,
{
    let nominal = Array2::from_elem((1, 1), value);
    let outputs = call(jacobian, &[column(x), nominal]).map_err(EvalError::Call)?;
    let row: Vec<f64> = match outputs.first() {
        Some(d) if d.len() == x.len() => d.iter().copied().collect(),
        other => {
            return Err(EvalError::Size {
                name: jacobian.name().to_owned(),
                expected: x.len(),
                found: other.map_or(0, Array2::len),
            });
        }
    };

    if row.iter().any(|g| !g.is_finite()) {
        return Err(EvalError::NonFinite {
            quantity: "gradient",
            x: x.to_vec(),
        });
    }
    Ok(row)
}

/// Packs a point into the `(n, 1)` column a value callback expects.
pub(crate) fn column(x: &[f64]) -> Array2<f64> {
    Array1::from(x.to_vec()).insert_axis(Axis(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use surrox_core::Differentiable;

    use crate::test_utils::Quadratic;

    #[test]
    fn evaluates_value_and_gradient() {
        let f = Quadratic::bowl(vec![1.0, -1.0]);
        let x = [2.0, 1.0];

        let value = objective(&f, &x).unwrap();
        let grad = gradient(&f.jacobian(), &x, value).unwrap();

        assert_relative_eq!(value, 5.0);
        assert_relative_eq!(grad[0], 2.0);
        assert_relative_eq!(grad[1], 4.0);
    }

    #[test]
    fn wrong_length_point_is_a_call_error() {
        let f = Quadratic::bowl(vec![0.0, 0.0]);

        let err = objective(&f, &[1.0]).unwrap_err();

        assert!(matches!(err, EvalError::Call(CallError::ArgShape { .. })));
    }

    #[test]
    fn callback_failures_keep_their_source() {
        let f = Quadratic {
            undefined_above: Some(1.0),
            ..Quadratic::bowl(vec![0.0])
        };

        let err = objective(&f, &[3.0]).unwrap_err();

        assert!(matches!(err, EvalError::Call(CallError::Eval(_))));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "evaluation failed");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let f = Quadratic::bowl(vec![f64::NAN]);

        let err = objective(&f, &[0.0]).unwrap_err();

        assert!(matches!(
            err,
            EvalError::NonFinite {
                quantity: "objective",
                ..
            }
        ));
    }
}
