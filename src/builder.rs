use crate::{HeadingSpec, InterpolationMode, Path, Result};
use glam::DVec2;

/// Accumulates waypoints, tangents and headings, then turns them into a [`Path`]
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use quintic_paths::PathBuilder;
///
/// let path = PathBuilder::new(DVec2::new(36., -63.), -10.)
///     .point_linear_heading(DVec2::new(30., -23.), 120., 120.)
///     .point_constant_heading(DVec2::new(27., 0.5), 45.)
///     .point_linear_heading(DVec2::new(45., -10.5), 0., 0.)
///     .point_constant_heading(DVec2::new(58.6, -9.5), 15.)
///     .build()
///     .unwrap();
///
/// assert_eq!(path.segments().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct PathBuilder {
    points: Vec<DVec2>,
    tangents_deg: Vec<f64>,
    headings: Vec<HeadingSpec>,
}

impl PathBuilder {
    /// Start a path at `start`, travelling in the direction `start_tangent_deg`
    ///
    /// The robot starts with a heading of 0; see [`PathBuilder::start_heading`].
    #[must_use]
    pub fn new(start: impl Into<DVec2>, start_tangent_deg: f64) -> Self {
        Self {
            points: vec![start.into()],
            tangents_deg: vec![start_tangent_deg],
            headings: vec![HeadingSpec::default()],
        }
    }

    /// Set the robot's heading at the start point, in degrees
    #[must_use]
    pub fn start_heading(mut self, heading_deg: f64) -> Self {
        self.headings[0] = HeadingSpec::from_degrees(heading_deg, InterpolationMode::Constant);
        self
    }

    /// Add a waypoint with an explicit heading and interpolation mode
    ///
    /// `mode` describes how the heading is reached over the segment ending at `point`.
    #[must_use]
    pub fn point_with_heading(
        mut self,
        point: impl Into<DVec2>,
        tangent_deg: f64,
        heading_deg: f64,
        mode: InterpolationMode,
    ) -> Self {
        self.points.push(point.into());
        self.tangents_deg.push(tangent_deg);
        self.headings.push(HeadingSpec::from_degrees(heading_deg, mode));
        self
    }

    /// Add a waypoint, holding the heading of the previous waypoint
    #[must_use]
    pub fn point_constant_heading(mut self, point: impl Into<DVec2>, tangent_deg: f64) -> Self {
        // the builder always holds at least the start point
        let previous = self.headings.last().map_or(0., |heading| heading.angle);

        self.points.push(point.into());
        self.tangents_deg.push(tangent_deg);
        self.headings.push(HeadingSpec::new(previous, InterpolationMode::Constant));
        self
    }

    /// Add a waypoint, turning linearly towards `heading_deg` on the way
    #[must_use]
    pub fn point_linear_heading(self, point: impl Into<DVec2>, tangent_deg: f64, heading_deg: f64) -> Self {
        self.point_with_heading(point, tangent_deg, heading_deg, InterpolationMode::Linear)
    }

    /// The waypoints added so far, start point included
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Validate the accumulated waypoints and build the path
    ///
    /// # Errors
    ///
    /// See [`Path::new`].
    pub fn build(&self) -> Result<Path> {
        Path::new(&self.points, &self.tangents_deg, Some(&self.headings))
    }
}
