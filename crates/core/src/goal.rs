use std::{fmt, str::FromStr};

use thiserror::Error;

/// The optimization direction.
///
/// Solvers always minimize internally. [`Goal::transform`] maps a user
/// objective into that internal cost, so a single search handles both
/// directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", try_from = "String"))]
pub enum Goal {
    #[default]
    Minimize,
    Maximize,
}

/// Error returned when parsing an unknown [`Goal`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown goal `{0}`, expected `minimize` or `maximize`")]
pub struct ParseGoalError(String);

impl Goal {
    /// Returns `1.0` when minimizing and `-1.0` when maximizing.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Minimize => 1.0,
            Self::Maximize => -1.0,
        }
    }

    /// Transforms an objective into an internal cost, or a cost back into
    /// an objective. The mapping is its own inverse.
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        self.sign() * value
    }

    /// Returns `true` if objective `a` is strictly better than objective `b`.
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.transform(a) < self.transform(b)
    }

    /// Returns the worst possible objective for this direction.
    #[must_use]
    pub fn worst(self) -> f64 {
        self.transform(f64::INFINITY)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimize => f.write_str("minimize"),
            Self::Maximize => f.write_str("maximize"),
        }
    }
}

impl FromStr for Goal {
    type Err = ParseGoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimize" | "min" => Ok(Self::Minimize),
            "maximize" | "max" => Ok(Self::Maximize),
            _ => Err(ParseGoalError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Goal {
    type Error = ParseGoalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
