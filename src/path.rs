use crate::{
    math::{distance, in_range, polar_deg},
    segment::DISPLACEMENT_TOLERANCE,
    Error, HeadingInterpolator, HeadingSpec, Result, Segment,
};
use glam::DVec2;
use tracing::{debug, trace};

/// A chain of quintic segments addressed by one global displacement axis
///
/// To construct this type, use [`Path::new`] or a [`PathBuilder`](crate::PathBuilder).
#[derive(Clone, Debug)]
pub struct Path {
    segments: Vec<Segment>,
    length: f64,
}

/// Length of the tangent vector used at each waypoint
fn tangent_lengths(waypoints: &[DVec2]) -> Vec<f64> {
    let last = waypoints.len() - 1;

    (0..=last)
        .map(|i| {
            if i == 0 {
                0.5 * distance(waypoints[0], waypoints[1])
            } else if i == last {
                0.5 * distance(waypoints[last - 1], waypoints[last])
            } else {
                distance(waypoints[i - 1], waypoints[i]).min(distance(waypoints[i], waypoints[i + 1]))
            }
        })
        .collect()
}

fn validate(waypoints: &[DVec2], tangent_angles_deg: &[f64], headings: Option<&[HeadingSpec]>) -> Result<()> {
    if waypoints.len() != tangent_angles_deg.len() {
        return Err(Error::invalid(format!(
            "got {} waypoints but {} tangent angles",
            waypoints.len(),
            tangent_angles_deg.len()
        )));
    }

    if let Some(headings) = headings {
        if headings.len() != waypoints.len() {
            return Err(Error::invalid(format!(
                "got {} waypoints but {} headings",
                waypoints.len(),
                headings.len()
            )));
        }
    }

    if waypoints.len() < 2 {
        return Err(Error::invalid("a path must contain at least two waypoints"));
    }

    if !waypoints.iter().all(|p| p.is_finite()) || !tangent_angles_deg.iter().all(|a| a.is_finite()) {
        return Err(Error::invalid("waypoints and tangent angles must be finite"));
    }

    if let Some(i) = waypoints.windows(2).position(|pair| pair[0] == pair[1]) {
        return Err(Error::invalid(format!(
            "waypoints {i} and {} are identical, which would make a null segment",
            i + 1
        )));
    }

    Ok(())
}

impl Path {
    /// Construct a path of `waypoints.len() - 1` segments that passes through every waypoint
    ///
    /// # Arguments
    ///
    /// * `waypoints`: The points the path must pass through, in order.
    /// * `tangent_angles_deg`: The direction of travel at each waypoint, in degrees.
    /// * `headings`: The robot's heading at each waypoint. When omitted every segment holds
    ///   a constant heading of 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the counts don't match, there are fewer than two
    /// waypoints, two consecutive waypoints are identical, or a constant heading segment
    /// is given two different headings. Nothing is built in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use quintic_paths::Path;
    ///
    /// let waypoints = [DVec2::new(0., 0.), DVec2::new(20., 20.), DVec2::new(40., 0.)];
    /// let path = Path::new(&waypoints, &[90., 0., -90.], None).unwrap();
    ///
    /// assert_eq!(path.segments().len(), 2);
    /// assert!(path.point_at(path.length()).unwrap().distance(DVec2::new(40., 0.)) < 1e-6);
    /// ```
    pub fn new(waypoints: &[DVec2], tangent_angles_deg: &[f64], headings: Option<&[HeadingSpec]>) -> Result<Self> {
        validate(waypoints, tangent_angles_deg, headings)?;

        let interpolators = match headings {
            Some(headings) => headings
                .windows(2)
                .map(|pair| HeadingInterpolator::new(pair[0].angle, pair[1].angle, pair[1].mode))
                .collect::<Result<Vec<_>>>()?,
            None => vec![HeadingInterpolator::constant(0.); waypoints.len() - 1],
        };

        let lengths = tangent_lengths(waypoints);
        let derivs: Vec<DVec2> = lengths
            .iter()
            .zip(tangent_angles_deg)
            .map(|(&length, &angle)| polar_deg(length, angle))
            .collect();

        let segments = interpolators
            .into_iter()
            .enumerate()
            .map(|(i, heading)| {
                Segment::from_endpoints(
                    [waypoints[i], derivs[i], DVec2::ZERO],
                    [waypoints[i + 1], derivs[i + 1], DVec2::ZERO],
                    heading,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_segments(segments)
    }

    /// Chain already built segments into a path
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `segments` is empty.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::invalid("a path must contain at least one segment"));
        }

        let mut length = 0.;
        for (i, segment) in segments.iter().enumerate() {
            trace!(segment = i, length = segment.length(), "segment built");
            length += segment.length();
        }

        debug!(segments = segments.len(), length, "path built");

        Ok(Self { segments, length })
    }

    /// The segments of the path, in order
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The total arc length of the path
    #[inline]
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Find the segment containing displacement `s`, and the displacement local to it
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `s` is not within `[0, length]`.
    pub fn locate(&self, s: f64) -> Result<(&Segment, f64)> {
        if !in_range(s, 0., self.length, DISPLACEMENT_TOLERANCE) {
            return Err(Error::OutOfRange {
                value: s,
                min: 0.,
                max: self.length,
            });
        }

        let s = s.clamp(0., self.length);
        let mut running = 0.;

        for segment in &self.segments {
            if s <= running + segment.length() {
                return Ok((segment, (s - running).clamp(0., segment.length())));
            }
            running += segment.length();
        }

        Err(Error::Internal(format!(
            "no segment contains displacement {s} of a path of length {}",
            self.length
        )))
    }

    /// Resolve `s` to its segment and the parameter local to that segment
    pub(crate) fn parameter_at(&self, s: f64) -> Result<(&Segment, f64)> {
        let (segment, local) = self.locate(s)?;
        Ok((segment, segment.parameter_at_displacement(local)?))
    }

    /// The point at displacement `s`
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range or the displacement cannot be inverted.
    pub fn point_at(&self, s: f64) -> Result<DVec2> {
        let (segment, t) = self.parameter_at(s)?;
        Ok(segment.point_at_parameter(t))
    }

    /// Signed curvature at displacement `s`
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range or the displacement cannot be inverted.
    pub fn curvature_at(&self, s: f64) -> Result<f64> {
        let (segment, t) = self.parameter_at(s)?;
        Ok(segment.curvature_at_parameter(t))
    }

    /// dy/dx at displacement `s`, or [`f64::INFINITY`] where the path is close to vertical
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range or the displacement cannot be inverted.
    pub fn tangent_slope_at(&self, s: f64) -> Result<f64> {
        let (segment, t) = self.parameter_at(s)?;
        Ok(segment.tangent_at_parameter(t))
    }

    /// The unit tangent at displacement `s`
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range or the displacement cannot be inverted.
    pub fn first_derivative_at(&self, s: f64) -> Result<DVec2> {
        let (segment, t) = self.parameter_at(s)?;
        Ok(segment.first_derivative_at_parameter(t).normalize())
    }

    /// The second derivative of the path with respect to displacement at `s`
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range or the displacement cannot be inverted.
    pub fn second_derivative_at(&self, s: f64) -> Result<DVec2> {
        let (segment, t) = self.parameter_at(s)?;
        let rt1 = segment.first_derivative_at_parameter(t);
        let rt2 = segment.second_derivative_at_parameter(t);
        let norm_sq = rt1.length_squared();

        Ok(rt2 / norm_sq - rt1 * rt1.dot(rt2) / (norm_sq * norm_sq))
    }

    /// The robot's heading in radians at displacement `s`
    ///
    /// # Errors
    ///
    /// Fails if `s` is out of range, the displacement cannot be inverted, or the segment
    /// uses a heading mode without an evaluation rule.
    pub fn heading_at(&self, s: f64) -> Result<f64> {
        let (segment, t) = self.parameter_at(s)?;
        segment.heading_at_parameter(t)
    }

    /// The last point of the path
    ///
    /// # Errors
    ///
    /// Fails if the displacement cannot be inverted.
    #[inline]
    pub fn endpoint(&self) -> Result<DVec2> {
        self.point_at(self.length)
    }

    /// Get a vec of all the points along the path every `step_distance`,
    /// with the start and end being sampled regardless of `step_distance`
    ///
    /// # Errors
    ///
    /// Fails if any displacement cannot be inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use quintic_paths::Path;
    ///
    /// let path = Path::new(&[DVec2::ZERO, DVec2::new(10., 0.)], &[0., 0.], None).unwrap();
    ///
    /// // 0, 3, 6 and the endpoint at 10
    /// let samples = path.sample_many(3.).unwrap();
    /// assert_eq!(samples.len(), 4);
    /// ```
    // There's nothing we can do about the precision loss
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_many(&self, step_distance: f64) -> Result<Vec<DVec2>> {
        debug_assert!(step_distance > 0.);

        // Ignoring cast_sign_loss because we know step_distance should positive
        // Ignoring cast_possible_truncation because rounding down is the correct behavior
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let num_samples = ((self.length / step_distance) as usize).max(1);

        (0..num_samples)
            .map(|i| i as f64 * step_distance)
            .chain(core::iter::once(self.length))
            .map(|s| self.point_at(s))
            .collect()
    }

    /// Sample every segment at `resolution + 1` evenly spaced parameters, for rendering
    #[must_use]
    pub fn plot_points(&self, resolution: usize) -> (Vec<f64>, Vec<f64>) {
        let mut x_points = Vec::with_capacity(self.segments.len() * (resolution + 1));
        let mut y_points = Vec::with_capacity(self.segments.len() * (resolution + 1));

        for segment in &self.segments {
            let (xs, ys) = segment.plot_points(resolution);
            x_points.extend(xs);
            y_points.extend(ys);
        }

        (x_points, y_points)
    }
}
