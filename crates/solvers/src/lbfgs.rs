//! Limited-memory BFGS for differentiable callbacks.
//!
//! # Algorithm
//!
//! L-BFGS builds a low-rank approximation of the inverse Hessian from the
//! last `memory` gradient differences and takes quasi-Newton steps along it.
//! Each step is sized by a Moré–Thuente line search. The implementation is
//! argmin's; this module wires it to [`Function`] callbacks.
//!
//! # Bounds
//!
//! L-BFGS itself is unconstrained. Bounded variables are reparameterized
//! through [`Bounds`], so every point handed to the callback is feasible and
//! the search never steps outside the box. Optima that sit exactly on a
//! finite bound are approached asymptotically.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per value evaluation and one per failure:
//!
//! - [`Event::Evaluated`]: the value callback succeeded
//! - [`Event::Failed`]: the value or Jacobian callback failed, or returned a
//!   non-finite result
//!
//! Line-search trial points are evaluations too, so an observer sees every
//! point the solver tries, not only accepted iterates.
//!
//! Observers can return [`Action::StopEarly`] to halt and keep the best point
//! seen so far.
//!
//! [`Function`]: surrox_core::Function
//! [`Bounds`]: crate::Bounds

mod action;
mod config;
mod error;
mod event;
mod search;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use surrox_core::{Differentiable, Goal, Observer};

use crate::Bounds;

use search::search;

/// Finds a minimum of the value callback.
///
/// `x0` must have one entry per input row and lie within `bounds`.
/// See the [module docs](self) for event timing and observer actions.
///
/// # Errors
///
/// Returns an error if the function signature, `x0`, or `bounds` are
/// invalid, if a callback fails and the observer does not stop the solver,
/// or if argmin fails before any point is evaluated.
pub fn minimize<F, Obs>(
    function: &F,
    x0: &[f64],
    bounds: &Bounds,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    F: Differentiable,
    Obs: for<'a> Observer<Event<'a, F::Error>, Action>,
{
    search(function, x0, bounds, config, observer, Goal::Minimize)
}

/// Finds a minimum of the value callback without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`minimize`].
pub fn minimize_unobserved<F>(
    function: &F,
    x0: &[f64],
    bounds: &Bounds,
    config: &Config,
) -> Result<Solution, Error>
where
    F: Differentiable,
{
    minimize(function, x0, bounds, config, ())
}

/// Finds a maximum of the value callback.
///
/// `x0` must have one entry per input row and lie within `bounds`.
/// See the [module docs](self) for event timing and observer actions.
///
/// # Errors
///
/// Returns an error if the function signature, `x0`, or `bounds` are
/// invalid, if a callback fails and the observer does not stop the solver,
/// or if argmin fails before any point is evaluated.
pub fn maximize<F, Obs>(
    function: &F,
    x0: &[f64],
    bounds: &Bounds,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    F: Differentiable,
    Obs: for<'a> Observer<Event<'a, F::Error>, Action>,
{
    search(function, x0, bounds, config, observer, Goal::Maximize)
}

/// Finds a maximum of the value callback without observer support.
///
/// This is a convenience wrapper around [`maximize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`maximize`].
pub fn maximize_unobserved<F>(
    function: &F,
    x0: &[f64],
    bounds: &Bounds,
    config: &Config,
) -> Result<Solution, Error>
where
    F: Differentiable,
{
    maximize(function, x0, bounds, config, ())
}
