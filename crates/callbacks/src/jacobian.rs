use std::sync::Arc;

use ndarray::{Array2, ArrayView2};

use surrox_core::{Function, Sparsity, Surrogate};

use crate::{CallbackOptions, OutputKind, SurrogateError, SurrogateModel};

/// The Jacobian of a [`SurrogateCallback`].
///
/// Inputs are the point (`nx × 1`) and the nominal output (`1 × 1`, unused).
/// The single output is the derivative of the selected surrogate output as
/// a `1 × nx` row.
///
/// By default the derivative comes from the surrogate's own gradient
/// queries. With [`CallbackOptions::enable_fd`] set, it is estimated by
/// central differences of the value output instead.
///
/// [`SurrogateCallback`]: crate::SurrogateCallback
#[derive(Debug)]
pub struct JacobianCallback<S> {
    name: String,
    model: Arc<SurrogateModel<S>>,
    kind: OutputKind,
    options: CallbackOptions,
}

impl<S: Surrogate> JacobianCallback<S> {
    pub(crate) fn new(
        name: String,
        model: Arc<SurrogateModel<S>>,
        kind: OutputKind,
        options: CallbackOptions,
    ) -> Self {
        Self {
            name,
            model,
            kind,
            options,
        }
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

    fn central_difference(
        &self,
        x: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, SurrogateError<S::Error>> {
        let point: Vec<f64> = x.iter().copied().collect();
        let mut shifted = point.clone();
        let mut jac = Array2::zeros((1, point.len()));

        for (k, &xk) in point.iter().enumerate() {
            let h = self.options.fd_step() * xk.abs().max(1.0);

            shifted[k] = xk + h;
            let forward = self.model.output_at(self.kind, &shifted)?;
            shifted[k] = xk - h;
            let backward = self.model.output_at(self.kind, &shifted)?;
            shifted[k] = xk;

            jac[[0, k]] = (forward - backward) / (2.0 * h);
        }

        Ok(jac)
    }
}

impl<S: Surrogate> Function for JacobianCallback<S> {
    type Error = SurrogateError<S::Error>;

    fn name(&self) -> &str {
        &self.name
    }

    fn n_in(&self) -> usize {
        2
    }

    fn n_out(&self) -> usize {
        1
    }

    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        match i {
            0 => Some(Sparsity::dense(self.model.nx(), 1)),
            1 => Some(Sparsity::scalar()),
            _ => None,
        }
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then(|| Sparsity::dense(1, self.model.nx()))
    }

    fn eval(&self, args: &[Array2<f64>]) -> Result<Vec<Array2<f64>>, Self::Error> {
        let x = args.first().ok_or(SurrogateError::MissingArgument(0))?;
        let jac = if self.options.enable_fd() {
            self.central_difference(x.view())?
        } else {
            self.model.output_gradient(self.kind, x.t())?
        };
        log::trace!("{}: d{} at {:?} = {}", self.name, self.kind, x.as_slice(), jac);
        Ok(vec![jac])
    }
}
