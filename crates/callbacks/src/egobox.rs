use egobox_moe::{GpMixtureParams, MixtureGpSurrogate, MoeError, SurrogateBuilder};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use surrox_core::Surrogate;

/// Adapts a trained egobox Gaussian-process mixture as a [`Surrogate`].
///
/// egobox returns full gradient matrices, so each per-direction query
/// computes the `(n, nx)` gradient and keeps column `kx`.
pub struct EgoboxSurrogate {
    gp: Box<dyn MixtureGpSurrogate>,
}

impl EgoboxSurrogate {
    /// Wraps a trained egobox model.
    #[must_use]
    pub fn new(gp: Box<dyn MixtureGpSurrogate>) -> Self {
        Self { gp }
    }

    /// Trains a single-cluster Kriging model with egobox defaults.
    ///
    /// `xt` holds one training point per row and `yt` the matching outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if egobox rejects the data or training fails.
    pub fn train(xt: ArrayView2<'_, f64>, yt: ArrayView1<'_, f64>) -> Result<Self, MoeError> {
        let gp = SurrogateBuilder::train(&GpMixtureParams::<f64>::new(), xt, yt)?;
        log::debug!("egobox: trained on {} point(s)", xt.nrows());
        Ok(Self::new(gp))
    }

    /// Returns the wrapped model.
    #[must_use]
    pub fn gp(&self) -> &dyn MixtureGpSurrogate {
        self.gp.as_ref()
    }
}

impl Surrogate for EgoboxSurrogate {
    type Error = MoeError;

    fn nx(&self) -> usize {
        self.gp.dims().0
    }

    fn predict_values(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        let y = self.gp.predict(&x)?;
        Ok(as_column(y.iter().copied()))
    }

    fn predict_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        let gradients = self.gp.predict_gradients(&x)?;
        Ok(gradients.column(kx).to_owned().insert_axis(Axis(1)))
    }

    fn predict_variances(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, Self::Error> {
        let v = self.gp.predict_var(&x)?;
        Ok(as_column(v.iter().copied()))
    }

    fn predict_variance_derivatives(
        &self,
        x: ArrayView2<'_, f64>,
        kx: usize,
    ) -> Result<Array2<f64>, Self::Error> {
        let gradients = self.gp.predict_var_gradients(&x)?;
        Ok(gradients.column(kx).to_owned().insert_axis(Axis(1)))
    }
}

fn as_column(values: impl Iterator<Item = f64>) -> Array2<f64> {
    values.collect::<Array1<f64>>().insert_axis(Axis(1))
}
