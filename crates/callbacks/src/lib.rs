//! Value and Jacobian callbacks over trained surrogate models.
//!
//! A [`SurrogateModel`] wraps any [`Surrogate`] and exposes four queries:
//! mean prediction, its gradient, variance prediction, and its gradient.
//! A [`SurrogateCallback`] adapts one of those outputs into a
//! [`Function`] that an optimizer can call symbolically, and its
//! [`Differentiable::jacobian`] builds the matching [`JacobianCallback`].
//!
//! ```ignore
//! let model = SurrogateModel::new(trained)?;
//! let objective = SurrogateCallback::new("sm", model, OutputKind::Predict);
//! let jacobian = objective.jacobian();
//! ```
//!
//! # Features
//!
//! - `egobox`: Enables [`EgoboxSurrogate`], which adapts a trained egobox
//!   Gaussian-process mixture.
//! - `serde`: Derives `Deserialize` for [`OutputKind`] and
//!   [`CallbackOptions`].
//!
//! [`Surrogate`]: surrox_core::Surrogate
//! [`Function`]: surrox_core::Function
//! [`Differentiable::jacobian`]: surrox_core::Differentiable::jacobian

mod jacobian;
mod model;
mod options;
mod output;
mod value;

#[cfg(feature = "egobox")]
mod egobox;

#[cfg(test)]
mod test_utils;

pub use jacobian::JacobianCallback;
pub use model::{SurrogateError, SurrogateModel};
pub use options::{CallbackOptions, OptionsError};
pub use output::{OutputKind, ParseOutputKindError};
pub use value::SurrogateCallback;

#[cfg(feature = "egobox")]
pub use egobox::EgoboxSurrogate;
