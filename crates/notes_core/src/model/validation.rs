//! Input validation failures surfaced as `ValidationFailed` to callers.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A table must declare at least one column.
    EmptyColumns,
    /// Row cell count does not match the table's column count.
    CellCountMismatch { expected: usize, actual: usize },
    /// Username does not match the allowed pattern.
    InvalidUsername(String),
    /// Password is blank or shorter than the minimum length.
    WeakPassword { min_len: usize },
    /// Style value is not one of `normal|bold|italic`.
    InvalidStyle(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyColumns => write!(f, "table must have at least one column"),
            Self::CellCountMismatch { expected, actual } => write!(
                f,
                "cell count ({actual}) does not match column count ({expected})"
            ),
            Self::InvalidUsername(value) => write!(
                f,
                "invalid username `{value}`: expected 3-32 chars of [A-Za-z0-9_.-]"
            ),
            Self::WeakPassword { min_len } => {
                write!(f, "password must be at least {min_len} characters")
            }
            Self::InvalidStyle(value) => {
                write!(f, "invalid style `{value}`; expected normal|bold|italic")
            }
        }
    }
}

impl Error for ValidationError {}
