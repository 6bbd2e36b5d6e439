use thiserror::Error;

/// Configuration for the L-BFGS solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConfig"))]
pub struct Config {
    max_iters: usize,
    tol_grad: f64,
    tol_cost: f64,
    memory: usize,
}

/// Errors that can occur when validating an L-BFGS solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tol_grad must be finite and non-negative")]
    TolGrad,

    #[error("tol_cost must be finite and non-negative")]
    TolCost,

    #[error("memory must be at least 1")]
    Memory,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, 1e-8, 1e-12, 7).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, or if
    /// `memory` is zero.
    pub fn new(
        max_iters: usize,
        tol_grad: f64,
        tol_cost: f64,
        memory: usize,
    ) -> Result<Self, ConfigError> {
        if !tol_grad.is_finite() || tol_grad < 0.0 {
            return Err(ConfigError::TolGrad);
        }
        if !tol_cost.is_finite() || tol_cost < 0.0 {
            return Err(ConfigError::TolCost);
        }
        if memory == 0 {
            return Err(ConfigError::Memory);
        }

        Ok(Self {
            max_iters,
            tol_grad,
            tol_cost,
            memory,
        })
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the gradient norm below which the solver has converged.
    #[must_use]
    pub fn tol_grad(&self) -> f64 {
        self.tol_grad
    }

    /// Returns the cost change below which the solver has converged.
    #[must_use]
    pub fn tol_cost(&self) -> f64 {
        self.tol_cost
    }

    /// Returns the number of correction pairs kept.
    #[must_use]
    pub fn memory(&self) -> usize {
        self.memory
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    max_iters: usize,
    tol_grad: f64,
    tol_cost: f64,
    memory: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.max_iters, raw.tol_grad, raw.tol_cost, raw.memory)
    }
}
