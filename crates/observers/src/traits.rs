//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasPoint`]: events that carry the evaluated point
//! - [`HasObjective`]: events that carry an objective value
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use surrox_core::Observer;
//! use surrox_observers::traits::{CanStopEarly, HasObjective};
//!
//! struct Budget {
//!     remaining: usize,
//! }
//!
//! impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for Budget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if !event.objective().is_nan() {
//!             self.remaining = self.remaining.saturating_sub(1);
//!         }
//!         (self.remaining == 0).then(A::stop_early)
//!     }
//! }
//! ```

use surrox_solvers::lbfgs;

/// An event that carries the point it refers to.
pub trait HasPoint {
    /// Returns the evaluated (or attempted) point.
    fn point(&self) -> &[f64];
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no objective
    /// is available.
    fn objective(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- lbfgs::Event ---

impl<E> HasPoint for lbfgs::Event<'_, E> {
    fn point(&self) -> &[f64] {
        self.x()
    }
}

impl<E> HasObjective for lbfgs::Event<'_, E> {
    fn objective(&self) -> f64 {
        lbfgs::Event::objective(self).unwrap_or(f64::NAN)
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for lbfgs::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
