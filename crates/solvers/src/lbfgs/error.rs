use crate::EvalError;

/// Errors that can occur during an L-BFGS run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`{name}` is not a scalar function of one column: {reason}")]
    Signature { name: String, reason: &'static str },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("bounds cover {found} variable(s), expected {expected}")]
    InvalidBounds { expected: usize, found: usize },

    #[error("invalid initial guess: {0}")]
    InitialGuess(String),

    #[error("callback failed")]
    Function(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("solver error: {0}")]
    Solver(String),

    #[error("solver stopped before any successful evaluation")]
    NoEvaluation,
}

impl<E> From<EvalError<E>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: EvalError<E>) -> Self {
        Error::Function(Box::new(error))
    }
}
