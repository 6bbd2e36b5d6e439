use std::{fmt, str::FromStr};

use thiserror::Error;

/// Which surrogate output a callback exposes.
///
/// The choice fixes both the value a callback returns and the derivative its
/// Jacobian returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub enum OutputKind {
    /// The mean prediction.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "predict"))]
    Predict,

    /// The prediction variance.
    #[cfg_attr(feature = "serde", serde(rename = "predict_variances"))]
    Variance,
}

/// Error returned when parsing an unknown [`OutputKind`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output kind `{0}`, expected `predict` or `predict_variances`")]
pub struct ParseOutputKindError(String);

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predict => f.write_str("predict"),
            Self::Variance => f.write_str("predict_variances"),
        }
    }
}

impl FromStr for OutputKind {
    type Err = ParseOutputKindError;

    /// Parses case-insensitively. `"variance"` is accepted as an alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "predict" => Ok(Self::Predict),
            "predict_variances" | "variance" => Ok(Self::Variance),
            _ => Err(ParseOutputKindError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for OutputKind {
    type Error = ParseOutputKindError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
