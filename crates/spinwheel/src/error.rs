//! Error types for the spin engine and sector geometry.

use thiserror::Error;

/// Errors returned by [`SpinEngine`](crate::SpinEngine) operations.
///
/// Every variant except [`SpinError::InvalidConfig`] is a caller-contract
/// violation: the host should have disabled the triggering action. A rejected
/// operation never changes engine state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpinError {
    /// A spin was requested with an empty participant list.
    #[error("cannot spin a wheel with no participants")]
    NoParticipants,

    /// The participant list exceeds the configured maximum.
    #[error("too many participants: {count} (maximum is {max})")]
    TooManyParticipants {
        /// Number of participants supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A spin was requested while one is already in flight.
    #[error("a spin is already in progress")]
    AlreadySpinning,

    /// The direction can only be changed while the wheel is idle.
    #[error("spin direction can only be changed while idle")]
    DirectionLocked,

    /// The number of turns must be finite and positive.
    #[error("invalid number of turns: {0}")]
    InvalidTurns(f64),

    /// The spin configuration is inconsistent.
    #[error("invalid spin configuration: {0}")]
    InvalidConfig(String),
}

impl SpinError {
    /// Returns true for errors caused by calling an operation in the wrong
    /// state or with an unusable participant list.
    pub const fn is_invalid_operation(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

/// Errors from building palettes and colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The string is not a `#RRGGBB` or `#RGB` color.
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),

    /// A palette needs at least one color.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}
