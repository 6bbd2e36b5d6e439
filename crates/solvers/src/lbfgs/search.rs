use std::cell::RefCell;

use argmin::{
    core::{Error as ArgminError, Executor, State, TerminationReason, TerminationStatus},
    solver::{linesearch::MoreThuenteLineSearch, quasinewton::LBFGS},
};

use surrox_core::{Differentiable, Function, Goal, Observer, Sparsity};

use crate::{
    Bounds,
    problem::{CallbackProblem, Tracker},
};

use super::{Action, Config, Error, Event, Solution, Status};

type LineSearch = MoreThuenteLineSearch<Vec<f64>, Vec<f64>, f64>;
type Solver = LBFGS<LineSearch, Vec<f64>, Vec<f64>, f64>;

/// Core L-BFGS driver shared by minimization and maximization.
///
/// argmin minimizes the goal-transformed cost over the unbounded space; the
/// tracker keeps the best point in the caller's coordinates and sign.
pub(super) fn search<F, Obs>(
    function: &F,
    x0: &[f64],
    bounds: &Bounds,
    config: &Config,
    observer: Obs,
    goal: Goal,
) -> Result<Solution, Error>
where
    F: Differentiable,
    Obs: for<'a> Observer<Event<'a, F::Error>, Action>,
{
    let jacobian = function.jacobian();
    let n = check_signature(function, &jacobian)?;
    check_start(x0, bounds, n)?;

    let solver = build_solver(config)?;
    let tracker = RefCell::new(Tracker::new(observer, goal));
    let problem = CallbackProblem::new(function, &jacobian, bounds, goal, &tracker);
    let z0 = bounds.to_unbounded(x0);

    log::debug!(
        "lbfgs: {goal} `{}` over {n} variable(s) from {x0:?}",
        function.name()
    );

    let result = Executor::new(problem, solver)
        .configure(|state| state.param(z0).max_iters(config.max_iters() as u64))
        .run();

    let outcome = result.map(|result| {
        let state = result.state();
        let iters = usize::try_from(state.get_iter()).ok();
        (status_of(state.get_termination_status()), iters)
    });

    let mut tracker = tracker.into_inner();
    let (status, iters) = resolve(outcome, &mut tracker).inspect_err(|error| {
        log::debug!("lbfgs: `{}` failed: {error}", function.name());
    })?;

    let best = tracker.best().cloned().ok_or(Error::NoEvaluation)?;

    log::debug!(
        "lbfgs: {status:?} at {:?} with objective {} after {} cost and {} gradient evaluation(s)",
        best.x,
        best.objective,
        tracker.cost_evals(),
        tracker.gradient_evals(),
    );

    Ok(Solution {
        status,
        x: best.x,
        objective: best.objective,
        iters,
        cost_evals: tracker.cost_evals(),
        gradient_evals: tracker.gradient_evals(),
    })
}

/// Decides how a finished argmin run ends.
///
/// argmin's line search swallows cost and gradient errors and may still
/// report success, so the tracker's record of a stop or a callback failure
/// outranks whatever argmin returned.
fn resolve<E, Obs>(
    outcome: Result<(Status, Option<usize>), ArgminError>,
    tracker: &mut Tracker<E, Obs>,
) -> Result<(Status, Option<usize>), Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    if tracker.stopped() {
        return Ok((Status::StoppedByObserver, None));
    }
    if let Some(failure) = tracker.take_failure() {
        return Err(failure.into());
    }
    match outcome {
        Ok(outcome) => Ok(outcome),
        Err(error) if tracker.best().is_some() => {
            log::warn!("lbfgs: argmin stopped with an error: {error}");
            Ok((Status::SolverExit(error.to_string()), None))
        }
        Err(error) => Err(Error::Solver(error.to_string())),
    }
}

/// Checks that `function` maps an `(n, 1)` column to a scalar and that its
/// Jacobian returns a `1×n` row, returning `n`.
fn check_signature<F>(function: &F, jacobian: &F::Jacobian) -> Result<usize, Error>
where
    F: Differentiable,
{
    let fail = |reason| Error::Signature {
        name: function.name().to_owned(),
        reason,
    };

    if function.n_in() != 1 {
        return Err(fail("expected exactly one input"));
    }
    let n = match function.sparsity_in(0) {
        Some(s) if s.cols() == 1 && s.rows() > 0 => s.rows(),
        _ => return Err(fail("input must be a non-empty column")),
    };
    if function.n_out() != 1 || function.sparsity_out(0) != Some(Sparsity::scalar()) {
        return Err(fail("expected exactly one scalar output"));
    }
    if jacobian.n_in() != 2 || jacobian.sparsity_out(0) != Some(Sparsity::dense(1, n)) {
        return Err(fail("jacobian must take (x, value) and return a row"));
    }
    Ok(n)
}

fn check_start(x0: &[f64], bounds: &Bounds, n: usize) -> Result<(), Error> {
    if bounds.len() != n {
        return Err(Error::InvalidBounds {
            expected: n,
            found: bounds.len(),
        });
    }
    if x0.len() != n {
        return Err(Error::InitialGuess(format!(
            "expected {n} value(s), got {}",
            x0.len()
        )));
    }
    if x0.iter().any(|xi| !xi.is_finite()) {
        return Err(Error::InitialGuess(format!("{x0:?} is not finite")));
    }
    if !bounds.contains(x0) {
        return Err(Error::InitialGuess(format!("{x0:?} is outside the bounds")));
    }
    Ok(())
}

fn build_solver(config: &Config) -> Result<Solver, Error> {
    LBFGS::new(LineSearch::new(), config.memory())
        .with_tolerance_grad(config.tol_grad())
        .and_then(|solver| solver.with_tolerance_cost(config.tol_cost()))
        .map_err(|e| Error::InvalidConfig(e.to_string()))
}

fn status_of(status: &TerminationStatus) -> Status {
    match status {
        TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        | TerminationStatus::NotTerminated => Status::MaxIters,
        TerminationStatus::Terminated(
            TerminationReason::SolverConverged | TerminationReason::TargetCostReached,
        ) => Status::Converged,
        TerminationStatus::Terminated(TerminationReason::SolverExit(reason)) => {
            Status::SolverExit(reason.clone())
        }
        TerminationStatus::Terminated(reason) => Status::SolverExit(format!("{reason:?}")),
    }
}
