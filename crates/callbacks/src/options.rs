use thiserror::Error;

/// Options shared by a value callback and the Jacobian it builds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOptions"))]
pub struct CallbackOptions {
    enable_fd: bool,
    fd_step: f64,
}

/// Errors that can occur when validating callback options.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    #[error("fd_step must be finite and positive")]
    FdStep,
}

impl Default for CallbackOptions {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(false, 1e-6).unwrap()
    }
}

impl CallbackOptions {
    /// Creates validated options.
    ///
    /// With `enable_fd` set, the Jacobian is estimated by central differences
    /// of the value output with relative step `fd_step`, instead of being
    /// queried from the surrogate.
    ///
    /// # Errors
    ///
    /// Returns an error if `fd_step` is not finite and positive.
    pub fn new(enable_fd: bool, fd_step: f64) -> Result<Self, OptionsError> {
        if !fd_step.is_finite() || fd_step <= 0.0 {
            return Err(OptionsError::FdStep);
        }
        Ok(Self { enable_fd, fd_step })
    }

    /// Returns a copy with finite differences enabled.
    #[must_use]
    pub fn with_fd(self) -> Self {
        Self {
            enable_fd: true,
            ..self
        }
    }

    #[must_use]
    pub fn enable_fd(&self) -> bool {
        self.enable_fd
    }

    #[must_use]
    pub fn fd_step(&self) -> f64 {
        self.fd_step
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawOptions {
    enable_fd: bool,
    fd_step: f64,
}

#[cfg(feature = "serde")]
impl Default for RawOptions {
    fn default() -> Self {
        let defaults = CallbackOptions::default();
        Self {
            enable_fd: defaults.enable_fd,
            fd_step: defaults.fd_step,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptions> for CallbackOptions {
    type Error = OptionsError;

    fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
        Self::new(raw.enable_fd, raw.fd_step)
    }
}
