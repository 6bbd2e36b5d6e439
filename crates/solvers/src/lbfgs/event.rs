use crate::EvalError;

/// Events emitted by the L-BFGS solver.
///
/// Points are in the caller's coordinates, inside the bounds, and objectives
/// are in the caller's sign regardless of the goal.
#[derive(Debug)]
pub enum Event<'a, E> {
    /// The value callback succeeded.
    Evaluated {
        /// The evaluated point.
        x: &'a [f64],

        /// The objective at `x`.
        objective: f64,

        /// The best objective seen so far, including this one.
        best: f64,
    },

    /// A value or Jacobian evaluation failed.
    Failed {
        /// The point where evaluation failed.
        x: &'a [f64],

        /// What went wrong.
        error: &'a EvalError<E>,
    },
}

impl<E> Event<'_, E> {
    /// Returns the point that was evaluated (or attempted).
    #[must_use]
    pub fn x(&self) -> &[f64] {
        match self {
            Self::Evaluated { x, .. } | Self::Failed { x, .. } => x,
        }
    }

    /// Returns the objective, if the evaluation succeeded.
    #[must_use]
    pub fn objective(&self) -> Option<f64> {
        match self {
            Self::Evaluated { objective, .. } => Some(*objective),
            Self::Failed { .. } => None,
        }
    }
}
