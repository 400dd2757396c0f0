//! Error types for Dubins planning.

use thiserror::Error;

/// Legacy status code for a successful call.
pub const DUBINS_OK: i32 = 0;

/// Errors for Dubins planning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DubinsError {
    /// Start and goal are colocated in a way no word can resolve.
    ///
    /// Reserved: none of the closed-form solvers currently produce it.
    #[error("configurations are colocated")]
    CoConfigs,

    /// Arc-length parameter lies outside the path.
    #[error("path parameter out of range")]
    BadParam,

    /// Turning radius must be positive and finite.
    #[error("turning radius must be positive")]
    BadRho,

    /// No connection between the configurations with the requested word(s).
    #[error("no path exists between the configurations")]
    NoPath,
}

impl DubinsError {
    /// Integer status used by callback-style callers (`0` is success).
    pub fn code(self) -> i32 {
        match self {
            Self::CoConfigs => 1,
            Self::BadParam => 2,
            Self::BadRho => 3,
            Self::NoPath => 4,
        }
    }
}

/// Failure to parse a [`PathWord`](crate::PathWord) from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown path word: {0:?}")]
pub struct ParseWordError(pub String);

pub type Result<T> = std::result::Result<T, DubinsError>;
