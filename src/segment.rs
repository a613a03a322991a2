use crate::{
    math::{cross, in_range},
    numeric::{brent, integrate, INTEGRATION_TOLERANCE, ROOT_TOLERANCE},
    Error, HeadingInterpolator, Polynomial, Result,
};
use glam::DVec2;

/// Slack allowed on displacement queries before they are rejected as out of range
pub const DISPLACEMENT_TOLERANCE: f64 = 1e-6;

/// Below this `|dx/dt|` the slope is reported as [`f64::INFINITY`]
pub const VERTICAL_SLOPE_THRESHOLD: f64 = 0.1;

/// Number of boundary values per axis: `[p0, v0, a0, p1, v1, a1]`
pub const BOUNDARY_LEN: usize = 6;

#[rustfmt::skip]
const HERMITE_MATRIX: [[f64; BOUNDARY_LEN]; BOUNDARY_LEN] = [
    [ -6., -3., -0.5,   6., -3.,  0.5],
    [ 15.,  8.,  1.5, -15.,  7., -1. ],
    [-10., -6., -1.5,  10., -4.,  0.5],
    [  0.,  0.,  0.5,   0.,  0.,  0. ],
    [  0.,  1.,  0.,    0.,  0.,  0. ],
    [  1.,  0.,  0.,    0.,  0.,  0. ],
    // Inverse of the system
    // f(0)   = [ 0,  0, 0, 0, 0, 1]
    // f'(0)  = [ 0,  0, 0, 0, 1, 0]
    // f''(0) = [ 0,  0, 0, 2, 0, 0]
    // f(1)   = [ 1,  1, 1, 1, 1, 1]
    // f'(1)  = [ 5,  4, 3, 2, 1, 0]
    // f''(1) = [20, 12, 6, 2, 0, 0]
];

/// Solve for the quintic that meets the given Hermite boundary conditions
///
/// `boundary` is `[p0, v0, a0, p1, v1, a1]`: value, first and second derivative at `t = 0`
/// followed by the same at `t = 1`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `boundary` does not hold exactly six values.
///
/// # Examples
///
/// ```
/// use quintic_paths::segment::compute_coeffs;
///
/// let poly = compute_coeffs(&[0., 1., 0., 1., 1., 0.]).unwrap();
/// assert!((poly.evaluate(0.5) - 0.5).abs() < 1e-12);
/// ```
pub fn compute_coeffs(boundary: &[f64]) -> Result<Polynomial> {
    let boundary: &[f64; BOUNDARY_LEN] = boundary.try_into().map_err(|_| {
        Error::invalid(format!(
            "expected {BOUNDARY_LEN} boundary values (p0, v0, a0, p1, v1, a1), got {}",
            boundary.len()
        ))
    })?;

    let mut coeffs = [0.; BOUNDARY_LEN];
    for (coeff, row) in coeffs.iter_mut().zip(&HERMITE_MATRIX) {
        *coeff = row.iter().zip(boundary).map(|(m, b)| m * b).sum();
    }

    Ok(Polynomial::new(coeffs))
}

/// One quintic Hermite patch between two waypoints
///
/// A segment is immutable once built; its arc length is integrated a single time during
/// construction.
#[derive(Clone, Debug)]
pub struct Segment {
    xpoly: Polynomial,
    ypoly: Polynomial,
    xpoly_first_deriv: Polynomial,
    ypoly_first_deriv: Polynomial,
    xpoly_second_deriv: Polynomial,
    ypoly_second_deriv: Polynomial,
    length: f64,
    heading: HeadingInterpolator,
}

impl Segment {
    /// Build a segment from per-axis boundary conditions
    ///
    /// # Arguments
    ///
    /// * `x_boundary`: `[x0, x0', x0'', x1, x1', x1'']`
    /// * `y_boundary`: `[y0, y0', y0'', y1, y1', y1'']`
    /// * `heading`: How the robot's heading changes over the segment.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for malformed boundary slices, and
    /// [`Error::NumericalFailure`] if the arc length could not be integrated.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintic_paths::{HeadingInterpolator, Segment};
    ///
    /// // A straight unit-speed line from (0, 0) to (1, 0)
    /// let segment = Segment::new(
    ///     &[0., 1., 0., 1., 1., 0.],
    ///     &[0., 0., 0., 0., 0., 0.],
    ///     HeadingInterpolator::constant(0.),
    /// )
    /// .unwrap();
    ///
    /// assert!((segment.length() - 1.).abs() < 1e-12);
    /// ```
    pub fn new(x_boundary: &[f64], y_boundary: &[f64], heading: HeadingInterpolator) -> Result<Self> {
        let xpoly = compute_coeffs(x_boundary)?;
        let ypoly = compute_coeffs(y_boundary)?;

        let mut segment = Self {
            xpoly,
            ypoly,
            xpoly_first_deriv: xpoly.first_derivative(),
            ypoly_first_deriv: ypoly.first_derivative(),
            xpoly_second_deriv: xpoly.second_derivative(),
            ypoly_second_deriv: ypoly.second_derivative(),
            length: 0.,
            heading,
        };
        segment.length = segment.displacement_at_parameter(1.)?;

        Ok(segment)
    }

    /// Build a segment from the position, velocity and acceleration vectors at both ends
    ///
    /// # Errors
    ///
    /// See [`Segment::new`].
    pub fn from_endpoints(
        start: [DVec2; 3],
        end: [DVec2; 3],
        heading: HeadingInterpolator,
    ) -> Result<Self> {
        let [p0, v0, a0] = start;
        let [p1, v1, a1] = end;

        Self::new(
            &[p0.x, v0.x, a0.x, p1.x, v1.x, a1.x],
            &[p0.y, v0.y, a0.y, p1.y, v1.y, a1.y],
            heading,
        )
    }

    /// The x(t) polynomial
    #[inline]
    #[must_use]
    pub const fn x_poly(&self) -> &Polynomial {
        &self.xpoly
    }

    /// The y(t) polynomial
    #[inline]
    #[must_use]
    pub const fn y_poly(&self) -> &Polynomial {
        &self.ypoly
    }

    /// The arc length of the segment over `t` in `[0, 1]`
    #[inline]
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// The heading interpolator of the segment
    #[inline]
    #[must_use]
    pub const fn heading_interpolator(&self) -> &HeadingInterpolator {
        &self.heading
    }

    /// The point at `t`
    #[inline]
    #[must_use]
    pub fn point_at_parameter(&self, t: f64) -> DVec2 {
        DVec2::new(self.xpoly.evaluate(t), self.ypoly.evaluate(t))
    }

    /// The first derivative with respect to `t`
    #[inline]
    #[must_use]
    pub fn first_derivative_at_parameter(&self, t: f64) -> DVec2 {
        DVec2::new(self.xpoly_first_deriv.evaluate(t), self.ypoly_first_deriv.evaluate(t))
    }

    /// The second derivative with respect to `t`
    #[inline]
    #[must_use]
    pub fn second_derivative_at_parameter(&self, t: f64) -> DVec2 {
        DVec2::new(self.xpoly_second_deriv.evaluate(t), self.ypoly_second_deriv.evaluate(t))
    }

    /// dy/dx at `t`, or [`f64::INFINITY`] where the tangent is close to vertical
    #[must_use]
    pub fn tangent_at_parameter(&self, t: f64) -> f64 {
        let deriv = self.first_derivative_at_parameter(t);
        if deriv.x.abs() < VERTICAL_SLOPE_THRESHOLD {
            return f64::INFINITY;
        }

        deriv.y / deriv.x
    }

    /// Signed curvature at `t`
    #[must_use]
    pub fn curvature_at_parameter(&self, t: f64) -> f64 {
        let rt1 = self.first_derivative_at_parameter(t);
        let rt2 = self.second_derivative_at_parameter(t);

        cross(rt1, rt2) / rt1.length().powi(3)
    }

    /// Heading in radians at `t`
    ///
    /// # Errors
    ///
    /// See [`HeadingInterpolator::heading_at`].
    #[inline]
    pub fn heading_at_parameter(&self, t: f64) -> Result<f64> {
        self.heading.heading_at(t)
    }

    /// Arc length from the start of the segment up to `t`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NumericalFailure`] if the integral does not converge.
    pub fn displacement_at_parameter(&self, t: f64) -> Result<f64> {
        integrate(
            |tau| self.first_derivative_at_parameter(tau).length(),
            0.,
            t,
            INTEGRATION_TOLERANCE,
        )
    }

    /// Find the parameter `t` in `[0, 1]` at which the arc length equals `s`
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `s` is not within `[0, length]`, and
    /// [`Error::NumericalFailure`] if no root is found inside `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintic_paths::{HeadingInterpolator, Segment};
    ///
    /// let segment = Segment::new(
    ///     &[0., 2., 0., 2., 2., 0.],
    ///     &[0., 0., 0., 0., 0., 0.],
    ///     HeadingInterpolator::constant(0.),
    /// )
    /// .unwrap();
    ///
    /// let t = segment.parameter_at_displacement(1.).unwrap();
    /// assert!((t - 0.5).abs() < 1e-9);
    /// ```
    pub fn parameter_at_displacement(&self, s: f64) -> Result<f64> {
        if !in_range(s, 0., self.length, DISPLACEMENT_TOLERANCE) {
            return Err(Error::OutOfRange {
                value: s,
                min: 0.,
                max: self.length,
            });
        }

        let s = s.clamp(0., self.length);
        if s == 0. {
            return Ok(0.);
        }
        if s == self.length {
            return Ok(1.);
        }

        let mut failure = None;
        let root = brent(
            |t| match self.displacement_at_parameter(t) {
                Ok(displacement) => displacement - s,
                Err(err) => {
                    failure.get_or_insert(err);
                    f64::NAN
                }
            },
            0.,
            1.,
            ROOT_TOLERANCE,
        );

        if let Some(err) = failure {
            return Err(err);
        }

        let t = root?;
        if !in_range(t, 0., 1., 0.) {
            return Err(Error::numerical(format!(
                "parameter {t} for displacement {s} lies outside of [0, 1]"
            )));
        }

        Ok(t)
    }

    /// The point at arc length `s` from the start of the segment
    ///
    /// # Errors
    ///
    /// See [`Segment::parameter_at_displacement`].
    #[inline]
    pub fn point_at_displacement(&self, s: f64) -> Result<DVec2> {
        Ok(self.point_at_parameter(self.parameter_at_displacement(s)?))
    }

    /// Sample the segment at `resolution + 1` evenly spaced parameters
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn plot_points(&self, resolution: usize) -> (Vec<f64>, Vec<f64>) {
        let resolution = resolution.max(1);

        (0..=resolution)
            .map(|i| self.point_at_parameter(i as f64 / resolution as f64))
            .map(|point| (point.x, point.y))
            .unzip()
    }
}
