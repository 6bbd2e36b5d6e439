//! Gradient-based optimization of differentiable callbacks.
//!
//! The solvers here drive a [`Differentiable`] function: a value callback
//! with a single `(n, 1)` input and a scalar output, plus the Jacobian
//! callback it builds. Every evaluation goes through [`call`], so the shapes
//! each callback declares are enforced on every iteration.
//!
//! # Solvers
//!
//! - [`lbfgs`]: limited-memory BFGS with a Moré–Thuente line search, with
//!   optional box bounds enforced by a smooth change of variables
//!
//! [`Differentiable`]: surrox_core::Differentiable
//! [`call`]: surrox_core::call

pub mod bounds;
pub mod evaluate;
pub mod lbfgs;

mod problem;

#[cfg(test)]
mod test_utils;

pub use bounds::{Bounds, BoundsError};
pub use evaluate::EvalError;
