//! Reusable observers for surrox solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solvers without naming their event types.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for cross-solver observers
//!   ([`HasPoint`], [`HasObjective`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`]: logs every evaluation through the `log` facade
//! - [`StopAtTarget`]: stops once an objective is good enough
//!
//! [`Observer`]: surrox_core::Observer
//! [`HasPoint`]: traits::HasPoint
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod log_observer;
mod target;

pub use log_observer::LogObserver;
pub use target::StopAtTarget;
