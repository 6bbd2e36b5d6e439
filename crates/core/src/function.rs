use ndarray::Array2;
use thiserror::Error;

use crate::Sparsity;

/// A callback that an optimizer evaluates as a symbolic function.
///
/// A function declares how many matrix arguments it takes and returns, and
/// the dense shape of each. Implementors supply the numerical logic in
/// [`Function::eval`]; callers go through [`call`], which checks every
/// argument and output against the declared shapes.
pub trait Function {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of inputs.
    fn n_in(&self) -> usize;

    /// Returns the number of outputs.
    fn n_out(&self) -> usize;

    /// Returns the shape of input `i`, or `None` if `i` is out of range.
    fn sparsity_in(&self, i: usize) -> Option<Sparsity>;

    /// Returns the shape of output `i`, or `None` if `i` is out of range.
    fn sparsity_out(&self, i: usize) -> Option<Sparsity>;

    /// Evaluates the function.
    ///
    /// `args` has already been checked against [`Function::sparsity_in`]
    /// when this is reached through [`call`].
    ///
    /// # Errors
    ///
    /// Returns an error if the outputs cannot be computed.
    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error>;
}

/// A function that supplies its own Jacobian.
///
/// The Jacobian callback receives the original inputs followed by the
/// nominal outputs, and returns the derivative of each output with respect
/// to each input. Implementing this trait is how a function reports that it
/// has a Jacobian; optimizers use it in place of finite differences.
pub trait Differentiable: Function {
    type Jacobian: Function<Error = Self::Error>;

    /// Builds the Jacobian callback.
    fn jacobian(&self) -> Self::Jacobian;
}

/// Errors returned by [`call`].
#[derive(Debug, Error)]
pub enum CallError<E> {
    #[error("`{name}` expects {expected} argument(s), got {found}")]
    ArgCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("`{name}` argument {index} must be {expected}, got {found}")]
    ArgShape {
        name: String,
        index: usize,
        expected: Sparsity,
        found: Sparsity,
    },

    #[error("`{name}` declares {expected} output(s), returned {found}")]
    OutputCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("`{name}` output {index} must be {expected}, got {found}")]
    OutputShape {
        name: String,
        index: usize,
        expected: Sparsity,
        found: Sparsity,
    },

    #[error("`{name}` declares no shape for {port} {index}")]
    Undeclared {
        name: String,
        port: &'static str,
        index: usize,
    },

    #[error("evaluation failed")]
    Eval(#[source] E),
}

/// Evaluates `function` with shape checks on both sides of `eval`.
///
/// # Errors
///
/// Returns an error if the argument count or any argument shape differs from
/// the declaration, if `eval` fails, or if the outputs do not match the
/// declared output count and shapes.
pub fn call<F>(function: &F, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, CallError<F::Error>>
where
    F: Function + ?Sized,
{
    let name = function.name();

    if args.len() != function.n_in() {
        return Err(CallError::ArgCount {
            name: name.to_owned(),
            expected: function.n_in(),
            found: args.len(),
        });
    }

    for (index, arg) in args.iter().enumerate() {
        let expected = function
            .sparsity_in(index)
            .ok_or_else(|| CallError::Undeclared {
                name: name.to_owned(),
                port: "input",
                index,
            })?;
        if !expected.matches(arg) {
            return Err(CallError::ArgShape {
                name: name.to_owned(),
                index,
                expected,
                found: Sparsity::of(arg),
            });
        }
    }

    let outputs = function.eval(args).map_err(CallError::Eval)?;

    if outputs.len() != function.n_out() {
        return Err(CallError::OutputCount {
            name: name.to_owned(),
            expected: function.n_out(),
            found: outputs.len(),
        });
    }

    for (index, output) in outputs.iter().enumerate() {
        let expected = function
            .sparsity_out(index)
            .ok_or_else(|| CallError::Undeclared {
                name: name.to_owned(),
                port: "output",
                index,
            })?;
        if !expected.matches(output) {
            return Err(CallError::OutputShape {
                name: name.to_owned(),
                index,
                expected,
                found: Sparsity::of(output),
            });
        }
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use ndarray::array;

    /// Sums a 2-vector and scales it: f(x) = k * (x₀ + x₁).
    ///
    /// The other fields bend the output or the declared input count so calls
    /// can be checked against a misbehaving callback.
    struct ScaledSum {
        k: f64,
        output_cols: usize,
        outputs: usize,
        n_in: usize,
    }

    impl ScaledSum {
        fn new(k: f64) -> Self {
            Self {
                k,
                output_cols: 1,
                outputs: 1,
                n_in: 1,
            }
        }
    }

    impl Function for ScaledSum {
        type Error = Infallible;

        fn name(&self) -> &str {
            "scaled_sum"
        }

        fn n_in(&self) -> usize {
            self.n_in
        }

        fn n_out(&self) -> usize {
            1
        }

        fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
            (i == 0).then_some(Sparsity::dense(2, 1))
        }

        fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
            (i == 0).then_some(Sparsity::scalar())
        }

        fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
            let total = self.k * args[0].sum();
            Ok(vec![
                Array2::from_elem((1, self.output_cols), total);
                self.outputs
            ])
        }
    }

    #[test]
    fn call_returns_checked_outputs() {
        let f = ScaledSum::new(2.0);

        let out = call(&f, &[array![[1.0], [3.0]]]).unwrap();

        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0][[0, 0]], 8.0);
    }

    #[test]
    fn call_rejects_wrong_arg_count() {
        let f = ScaledSum::new(1.0);

        let err = call(&f, &[]).unwrap_err();

        assert!(matches!(
            err,
            CallError::ArgCount {
                expected: 1,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn call_rejects_row_where_column_expected() {
        let f = ScaledSum::new(1.0);

        let err = call(&f, &[array![[1.0, 3.0]]]).unwrap_err();

        match err {
            CallError::ArgShape {
                index,
                expected,
                found,
                ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(expected, Sparsity::dense(2, 1));
                assert_eq!(found, Sparsity::dense(1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn call_rejects_misshapen_output() {
        let f = ScaledSum {
            output_cols: 3,
            ..ScaledSum::new(1.0)
        };

        let err = call(&f, &[array![[1.0], [3.0]]]).unwrap_err();

        assert!(matches!(err, CallError::OutputShape { index: 0, .. }));
        assert_eq!(
            err.to_string(),
            "`scaled_sum` output 0 must be 1×1, got 1×3"
        );
    }

    #[test]
    fn call_rejects_extra_outputs() {
        let f = ScaledSum {
            outputs: 2,
            ..ScaledSum::new(1.0)
        };

        let err = call(&f, &[array![[1.0], [3.0]]]).unwrap_err();

        assert!(matches!(
            err,
            CallError::OutputCount {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn call_rejects_inputs_without_a_declared_shape() {
        let f = ScaledSum {
            n_in: 2,
            ..ScaledSum::new(1.0)
        };

        let err = call(&f, &[array![[1.0], [3.0]], array![[0.0]]]).unwrap_err();

        assert!(matches!(
            err,
            CallError::Undeclared {
                port: "input",
                index: 1,
                ..
            }
        ));
        assert_eq!(err.to_string(), "`scaled_sum` declares no shape for input 1");
    }
}
