use crate::{Error, Result};

/// How the robot's heading evolves between two waypoints
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    #[default]
    /// Hold a single heading over the whole segment
    Constant,
    /// Blend linearly from the start heading to the end heading
    Linear,
    /// Follow the path tangent; no evaluation rule exists yet
    Tangent,
    /// Smooth spline blend; no evaluation rule exists yet
    Spline,
}

impl InterpolationMode {
    /// All of the interpolation modes
    pub const ALL: [Self; 4] = [Self::Constant, Self::Linear, Self::Tangent, Self::Spline];
}

/// A desired heading at a waypoint, and how to reach it from the previous one
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingSpec {
    /// The heading in radians
    pub angle: f64,
    /// The interpolation used on the segment that ends at this waypoint
    pub mode: InterpolationMode,
}

impl HeadingSpec {
    /// Create a new [`HeadingSpec`] from an angle in radians
    #[inline]
    #[must_use]
    pub const fn new(angle: f64, mode: InterpolationMode) -> Self {
        Self { angle, mode }
    }

    /// Create a new [`HeadingSpec`] from an angle in degrees
    #[inline]
    #[must_use]
    pub fn from_degrees(angle_deg: f64, mode: InterpolationMode) -> Self {
        Self::new(angle_deg.to_radians(), mode)
    }
}

impl From<(f64, InterpolationMode)> for HeadingSpec {
    /// The angle is taken to be in degrees, like the tangent angles of a path
    #[inline]
    fn from((angle_deg, mode): (f64, InterpolationMode)) -> Self {
        Self::from_degrees(angle_deg, mode)
    }
}

/// Maps a segment's local parameter to a heading angle
///
/// The interpolator is owned by the [`Segment`](crate::Segment) it describes and is
/// evaluated through [`Segment::heading_at_parameter`](crate::Segment::heading_at_parameter).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HeadingInterpolator {
    start_angle: f64,
    end_angle: f64,
    mode: InterpolationMode,
}

impl HeadingInterpolator {
    /// Create an interpolator between two headings in radians
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a [`InterpolationMode::Constant`] interpolator
    /// whose start and end headings differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintic_paths::{HeadingInterpolator, InterpolationMode};
    ///
    /// let linear = HeadingInterpolator::new(0., 1., InterpolationMode::Linear).unwrap();
    /// assert_eq!(linear.heading_at(0.25).unwrap(), 0.25);
    ///
    /// assert!(HeadingInterpolator::new(0., 1., InterpolationMode::Constant).is_err());
    /// ```
    pub fn new(start_angle: f64, end_angle: f64, mode: InterpolationMode) -> Result<Self> {
        if mode == InterpolationMode::Constant && start_angle != end_angle {
            return Err(Error::invalid(format!(
                "a constant heading interpolator needs identical start and end headings, got {start_angle} and {end_angle}"
            )));
        }

        Ok(Self {
            start_angle,
            end_angle,
            mode,
        })
    }

    /// An interpolator that holds `angle` for the whole segment
    #[inline]
    #[must_use]
    pub const fn constant(angle: f64) -> Self {
        Self {
            start_angle: angle,
            end_angle: angle,
            mode: InterpolationMode::Constant,
        }
    }

    /// The heading at the start of the segment
    #[inline]
    #[must_use]
    pub const fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The heading at the end of the segment
    #[inline]
    #[must_use]
    pub const fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The interpolation mode
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Heading in radians at the segment parameter `t` in `[0, 1]`
    ///
    /// # Errors
    ///
    /// [`InterpolationMode::Tangent`] and [`InterpolationMode::Spline`] have no evaluation
    /// rule and return [`Error::Unimplemented`].
    pub fn heading_at(&self, t: f64) -> Result<f64> {
        match self.mode {
            InterpolationMode::Constant => Ok(self.start_angle),
            InterpolationMode::Linear => Ok((1. - t) * self.start_angle + t * self.end_angle),
            InterpolationMode::Tangent => Err(Error::Unimplemented("tangent heading interpolation")),
            InterpolationMode::Spline => Err(Error::Unimplemented("spline heading interpolation")),
        }
    }
}
