use core::result;
use glam::DVec2;
use thiserror::Error;

/// Everything that can go wrong while building a path or planning a profile
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Malformed construction arguments
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A displacement or parameter was queried outside of its valid domain
    #[error("{value} is outside of the valid range [{min}, {max}]")]
    OutOfRange {
        /// The offending value
        value: f64,
        /// Lower bound of the domain
        min: f64,
        /// Upper bound of the domain
        max: f64,
    },
    /// Root finding or numerical integration did not converge
    #[error("numerical failure: {0}")]
    NumericalFailure(String),
    /// An internal invariant was violated; this is a bug
    #[error("internal error: {0}")]
    Internal(String),
    /// The requested behaviour exists as a variant but has no evaluation rule
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn numerical(msg: impl Into<String>) -> Self {
        Self::NumericalFailure(msg.into())
    }
}

/// A type that allows the function to return either
///
/// Ok(T) or Err([`Error`])
pub type Result<T> = result::Result<T, Error>;

/// The robot's position and heading in radians at an instant of the trajectory
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// The x coordinate
    pub x: f64,
    /// The y coordinate
    pub y: f64,
    /// The heading in radians
    pub heading: f64,
}

impl Pose {
    /// Create a new [`Pose`] from a position and heading
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Get the position
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<[f64; 3]> for Pose {
    #[inline]
    fn from(pose: [f64; 3]) -> Self {
        Self::new(pose[0], pose[1], pose[2])
    }
}
