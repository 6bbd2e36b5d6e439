use std::cell::RefCell;

use argmin::core::{CostFunction, Error as ArgminError, Gradient};
use thiserror::Error;

use surrox_core::{Differentiable, Goal, Observer};

use crate::{
    Bounds,
    evaluate::{self, EvalError},
    lbfgs::{Action, Event},
};

/// Why a callback evaluation was cut short.
///
/// The details live in the [`Tracker`]; argmin only needs to unwind.
#[derive(Debug, Error)]
enum Interrupt {
    #[error("stopped by observer")]
    Stopped,

    #[error("callback evaluation failed")]
    Failed,
}

/// The best point seen so far, in the caller's sign.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Best {
    pub(crate) x: Vec<f64>,
    pub(crate) objective: f64,
}

/// Mutable bookkeeping shared between the argmin problem and the driver.
pub(crate) struct Tracker<E, Obs> {
    observer: Obs,
    goal: Goal,
    best: Option<Best>,
    last: Option<(Vec<f64>, f64)>,
    failure: Option<EvalError<E>>,
    stopped: bool,
    cost_evals: usize,
    gradient_evals: usize,
}

impl<E, Obs> Tracker<E, Obs> {
    pub(crate) fn new(observer: Obs, goal: Goal) -> Self {
        Self {
            observer,
            goal,
            best: None,
            last: None,
            failure: None,
            stopped: false,
            cost_evals: 0,
            gradient_evals: 0,
        }
    }

    pub(crate) fn best(&self) -> Option<&Best> {
        self.best.as_ref()
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn take_failure(&mut self) -> Option<EvalError<E>> {
        self.failure.take()
    }

    pub(crate) fn cost_evals(&self) -> usize {
        self.cost_evals
    }

    pub(crate) fn gradient_evals(&self) -> usize {
        self.gradient_evals
    }

    pub(crate) fn record(&mut self, x: &[f64], objective: f64) {
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| self.goal.is_better(objective, best.objective));
        if improved {
            self.best = Some(Best {
                x: x.to_vec(),
                objective,
            });
        }
        self.last = Some((x.to_vec(), objective));
    }

    /// Returns the cached nominal value if `x` was the last point evaluated.
    fn cached(&self, x: &[f64]) -> Option<f64> {
        self.last
            .as_ref()
            .filter(|(last, _)| last.as_slice() == x)
            .map(|&(_, value)| value)
    }

    /// Refuses further work once the run is stopped or has failed.
    fn check_running(&self) -> Result<(), ArgminError> {
        if self.stopped {
            Err(Interrupt::Stopped.into())
        } else if self.failure.is_some() {
            Err(Interrupt::Failed.into())
        } else {
            Ok(())
        }
    }

    pub(crate) fn fail(&mut self, error: EvalError<E>, action: Option<Action>) -> ArgminError {
        if action == Some(Action::StopEarly) {
            self.stopped = true;
        }
        if self.failure.is_none() {
            self.failure = Some(error);
        }
        Interrupt::Failed.into()
    }
}

/// Exposes a differentiable callback as an argmin problem.
///
/// argmin always minimizes over an unconstrained `z`. This adapter maps `z`
/// into the bounds, evaluates the callbacks at the bounded point, flips the
/// sign for maximization, and applies the chain rule to the gradient.
pub(crate) struct CallbackProblem<'a, F, Obs>
where
    F: Differentiable,
{
    function: &'a F,
    jacobian: &'a F::Jacobian,
    bounds: &'a Bounds,
    goal: Goal,
    tracker: &'a RefCell<Tracker<F::Error, Obs>>,
}

impl<'a, F, Obs> CallbackProblem<'a, F, Obs>
where
    F: Differentiable,
{
    pub(crate) fn new(
        function: &'a F,
        jacobian: &'a F::Jacobian,
        bounds: &'a Bounds,
        goal: Goal,
        tracker: &'a RefCell<Tracker<F::Error, Obs>>,
    ) -> Self {
        Self {
            function,
            jacobian,
            bounds,
            goal,
            tracker,
        }
    }
}

impl<F, Obs> CallbackProblem<'_, F, Obs>
where
    F: Differentiable,
    Obs: for<'e> Observer<Event<'e, F::Error>, Action>,
{
    /// Evaluates the objective at `x`, records it, and reports it.
    ///
    /// Used by the cost and by the gradient when the value is not cached.
    fn observed_objective(
        &self,
        tracker: &mut Tracker<F::Error, Obs>,
        x: &[f64],
    ) -> Result<f64, ArgminError> {
        tracker.cost_evals += 1;

        match evaluate::objective(self.function, x) {
            Ok(objective) => {
                tracker.record(x, objective);
                let best = tracker.best.as_ref().map_or(objective, |b| b.objective);
                let event = Event::Evaluated { x, objective, best };
                if tracker.observer.observe(&event) == Some(Action::StopEarly) {
                    tracker.stopped = true;
                    return Err(Interrupt::Stopped.into());
                }
                Ok(objective)
            }
            Err(error) => {
                let event = Event::Failed { x, error: &error };
                let action = tracker.observer.observe(&event);
                Err(tracker.fail(error, action))
            }
        }
    }
}

impl<F, Obs> CostFunction for CallbackProblem<'_, F, Obs>
where
    F: Differentiable,
    Obs: for<'e> Observer<Event<'e, F::Error>, Action>,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, z: &Self::Param) -> Result<Self::Output, ArgminError> {
        let mut tracker = self.tracker.borrow_mut();
        tracker.check_running()?;

        let x = self.bounds.to_bounded(z);
        let objective = self.observed_objective(&mut tracker, &x)?;
        Ok(self.goal.transform(objective))
    }
}

impl<F, Obs> Gradient for CallbackProblem<'_, F, Obs>
where
    F: Differentiable,
    Obs: for<'e> Observer<Event<'e, F::Error>, Action>,
{
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, ArgminError> {
        let mut tracker = self.tracker.borrow_mut();
        tracker.check_running()?;

        let x = self.bounds.to_bounded(z);
        let value = match tracker.cached(&x) {
            Some(value) => value,
            None => self.observed_objective(&mut tracker, &x)?,
        };
        tracker.gradient_evals += 1;

        match evaluate::gradient(self.jacobian, &x, value) {
            Ok(grad_x) => {
                let signed: Vec<f64> = grad_x.iter().map(|&g| self.goal.transform(g)).collect();
                Ok(self.bounds.scale_gradient(z, &signed))
            }
            Err(error) => {
                let event = Event::Failed {
                    x: &x,
                    error: &error,
                };
                let action = tracker.observer.observe(&event);
                Err(tracker.fail(error, action))
            }
        }
    }
}
