//! Core traits and types for surrox.
//!
//! This crate defines the shared abstractions that callbacks, solvers, and
//! observers build on:
//!
//! - [`Surrogate`]: a trained regression model with a fixed input
//!   dimensionality, supplied by an external library
//! - [`Sparsity`]: the dense shape of a callback input or output
//! - [`Function`] and [`Differentiable`]: the callback interface that an
//!   optimizer drives, with [`call`] performing shape checks around `eval`
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`Goal`]: whether an objective is minimized or maximized

mod function;
mod goal;
mod observer;
mod sparsity;
mod surrogate;

pub use function::{CallError, Differentiable, Function, call};
pub use goal::{Goal, ParseGoalError};
pub use observer::Observer;
pub use sparsity::Sparsity;
pub use surrogate::Surrogate;
