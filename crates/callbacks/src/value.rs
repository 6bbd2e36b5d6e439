use std::sync::Arc;

use ndarray::Array2;

use surrox_core::{Differentiable, Function, Sparsity, Surrogate};

use crate::{CallbackOptions, JacobianCallback, OutputKind, SurrogateError, SurrogateModel};

/// A value callback over a surrogate output.
///
/// Takes one `nx × 1` column and returns the selected output as a `1 × 1`
/// matrix. The Jacobian built by [`Differentiable::jacobian`] shares the
/// same surrogate and output kind.
#[derive(Debug)]
pub struct SurrogateCallback<S> {
    name: String,
    model: Arc<SurrogateModel<S>>,
    kind: OutputKind,
    options: CallbackOptions,
}

impl<S: Surrogate> SurrogateCallback<S> {
    /// Creates a callback with default options.
    pub fn new(
        name: impl Into<String>,
        model: impl Into<Arc<SurrogateModel<S>>>,
        kind: OutputKind,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            kind,
            options: CallbackOptions::default(),
        }
    }

    /// Replaces the callback options.
    #[must_use]
    pub fn with_options(self, options: CallbackOptions) -> Self {
        Self { options, ..self }
    }

    #[must_use]
    pub fn model(&self) -> &SurrogateModel<S> {
        &self.model
    }

    #[must_use]
    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> CallbackOptions {
        self.options
    }
}

impl<S: Surrogate> Function for SurrogateCallback<S> {
    type Error = SurrogateError<S::Error>;

    fn name(&self) -> &str {
        &self.name
    }

    fn n_in(&self) -> usize {
        1
    }

    fn n_out(&self) -> usize {
        1
    }

    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then(|| Sparsity::dense(self.model.nx(), 1))
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then_some(Sparsity::scalar())
    }

    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
        let x = args.first().ok_or(SurrogateError::MissingArgument(0))?;
        let y = self.model.output(self.kind, x.t())?;
        log::trace!("{}: {} at {:?} = {}", self.name, self.kind, x.as_slice(), y[[0, 0]]);
        Ok(vec![y])
    }
}

impl<S: Surrogate> Differentiable for SurrogateCallback<S> {
    type Jacobian = JacobianCallback<S>;

    fn jacobian(&self) -> Self::Jacobian {
        JacobianCallback::new(
            format!("jac_{}", self.name),
            Arc::clone(&self.model),
            self.kind,
            self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use surrox_core::{CallError, call};

    use crate::test_utils::{Paraboloid, Unavailable};

    fn callback(kind: OutputKind) -> SurrogateCallback<Paraboloid> {
        let model = SurrogateModel::new(Paraboloid::new(vec![0.5, 1.5, -1.0])).unwrap();
        SurrogateCallback::new("sm", model, kind)
    }

    #[test]
    fn declares_column_in_scalar_out() {
        let f = callback(OutputKind::Predict);

        assert_eq!(f.name(), "sm");
        assert_eq!(f.n_in(), 1);
        assert_eq!(f.n_out(), 1);
        assert_eq!(f.sparsity_in(0), Some(Sparsity::dense(3, 1)));
        assert_eq!(f.sparsity_out(0), Some(Sparsity::scalar()));
        assert_eq!(f.sparsity_in(1), None);
        assert_eq!(f.sparsity_out(1), None);
    }

    #[test]
    fn evaluates_mean_prediction() {
        let f = callback(OutputKind::Predict);

        let out = call(&f, &[array![[0.5], [0.5], [1.0]]]).unwrap();

        // (0)² + (-1)² + (2)²
        assert_relative_eq!(out[0][[0, 0]], 5.0);
    }

    #[test]
    fn evaluates_variance_prediction() {
        let f = callback(OutputKind::Variance);

        let out = call(&f, &[array![[1.0], [2.0], [0.0]]]).unwrap();

        assert_relative_eq!(out[0][[0, 0]], 0.5);
    }

    #[test]
    fn rejects_row_input() {
        let f = callback(OutputKind::Predict);

        let err = call(&f, &[array![[0.5, 0.5, 1.0]]]).unwrap_err();

        assert!(matches!(err, CallError::ArgShape { index: 0, .. }));
    }

    #[test]
    fn direct_eval_without_args_is_an_error() {
        let f = callback(OutputKind::Predict);

        assert!(matches!(
            f.eval(&[]),
            Err(SurrogateError::MissingArgument(0))
        ));
    }

    #[test]
    fn surrogate_failure_surfaces_as_eval_error() {
        let model = SurrogateModel::new(Unavailable { nx: 2 }).unwrap();
        let f = SurrogateCallback::new("broken", model, OutputKind::Predict);

        let err = call(&f, &[array![[0.0], [0.0]]]).unwrap_err();

        assert!(matches!(err, CallError::Eval(SurrogateError::Surrogate(_))));
    }

    #[test]
    fn jacobian_shares_model_and_kind() {
        let f = callback(OutputKind::Variance);

        let jac = f.jacobian();

        assert_eq!(jac.name(), "jac_sm");
        assert_eq!(jac.kind(), OutputKind::Variance);
        assert!(std::ptr::eq(jac.model(), f.model()));
    }
}
