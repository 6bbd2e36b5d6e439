/// Why the solver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The gradient or cost change fell below its tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,

    /// argmin stopped for another reason, such as a line search that could
    /// not make progress.
    SolverExit(String),
}

/// The result of an L-BFGS run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Best point evaluated.
    pub x: Vec<f64>,

    /// Objective at `x`, in the caller's sign.
    pub objective: f64,

    /// Completed iterations, or `None` if the run was interrupted before
    /// argmin reported them.
    pub iters: Option<usize>,

    /// Number of value callback evaluations requested by the solver.
    pub cost_evals: usize,

    /// Number of Jacobian callback evaluations requested by the solver.
    pub gradient_evals: usize,
}
