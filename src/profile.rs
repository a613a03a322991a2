use crate::{Error, Path, Result, Segment};
use tracing::{debug, warn};

/// Below this curvature magnitude the path is treated as straight
pub const CURVATURE_EPSILON: f64 = 0.001;

/// The kinematic limits of the robot
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    /// Maximum linear speed
    pub max_vel: f64,
    /// Maximum linear acceleration
    pub max_acc: f64,
    /// Maximum angular velocity
    pub max_ang_vel: f64,
    /// Maximum angular acceleration
    pub max_ang_acc: f64,
}

impl Constraints {
    /// Create a new set of kinematic limits
    #[inline]
    #[must_use]
    pub const fn new(max_vel: f64, max_acc: f64, max_ang_vel: f64, max_ang_acc: f64) -> Self {
        Self {
            max_vel,
            max_acc,
            max_ang_vel,
            max_ang_acc,
        }
    }

    /// Check that every limit is strictly positive and finite
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first offending limit.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_vel", self.max_vel),
            ("max_acc", self.max_acc),
            ("max_ang_vel", self.max_ang_vel),
            ("max_ang_acc", self.max_ang_acc),
        ];

        for (name, value) in limits {
            if !(value.is_finite() && value > 0.) {
                return Err(Error::invalid(format!("{name} must be positive and finite, got {value}")));
            }
        }

        Ok(())
    }
}

/// Boundary conditions and resolution of a profile
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileOptions {
    /// Speed at the start of the path
    pub start_vel: f64,
    /// Speed at the end of the path
    pub end_vel: f64,
    /// Number of displacement samples to plan over, at least 2
    pub sample_count: usize,
    /// Acceleration recorded at the start of the path
    pub start_acc: f64,
    /// Acceleration expected at the end of the path
    ///
    /// Validated and kept for callers; the final sample records the acceleration of the
    /// last planned step instead.
    pub end_acc: f64,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            start_vel: 0.,
            end_vel: 0.,
            sample_count: 200,
            start_acc: 0.,
            end_acc: 0.,
        }
    }
}

impl ProfileOptions {
    /// Set the speed at the start of the path
    #[inline]
    #[must_use]
    pub fn start_vel(mut self, start_vel: f64) -> Self {
        self.start_vel = start_vel;
        self
    }

    /// Set the speed at the end of the path
    #[inline]
    #[must_use]
    pub fn end_vel(mut self, end_vel: f64) -> Self {
        self.end_vel = end_vel;
        self
    }

    /// Set the number of displacement samples
    #[inline]
    #[must_use]
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the acceleration recorded on the first sample
    #[inline]
    #[must_use]
    pub fn start_acc(mut self, start_acc: f64) -> Self {
        self.start_acc = start_acc;
        self
    }

    /// Set the acceleration expected at the end of the path
    #[inline]
    #[must_use]
    pub fn end_acc(mut self, end_acc: f64) -> Self {
        self.end_acc = end_acc;
        self
    }

    /// Check the sample count and the boundary speeds
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there are fewer than two samples, or a boundary
    /// speed is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < 2 {
            return Err(Error::invalid(format!(
                "a profile needs at least 2 samples, got {}",
                self.sample_count
            )));
        }

        for (name, value) in [("start_vel", self.start_vel), ("end_vel", self.end_vel)] {
            if !(value.is_finite() && value >= 0.) {
                return Err(Error::invalid(format!("{name} must be non-negative and finite, got {value}")));
            }
        }

        if !(self.start_acc.is_finite() && self.end_acc.is_finite()) {
            return Err(Error::invalid("boundary accelerations must be finite"));
        }

        Ok(())
    }
}

/// Position, velocity and acceleration along one axis at an instant
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicState {
    /// Displacement for the absolute state, coordinate for a per-axis state
    pub position: f64,
    /// Speed along the path, or the velocity component along one axis
    pub velocity: f64,
    /// Acceleration along the path, or its component along one axis
    pub acceleration: f64,
    /// Not produced by the planner
    pub jerk: Option<f64>,
}

impl KinematicState {
    /// Create a new [`KinematicState`] without a jerk
    #[inline]
    #[must_use]
    pub const fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            jerk: None,
        }
    }
}

/// A [`KinematicState`] paired with its timestamp
pub type TimedState = (f64, KinematicState);

/// The speed cap imposed by the curvature at a sample
///
/// This divides the angular acceleration budget by the curvature, which is a proxy for
/// a centripetal bound rather than a strict one.
fn curvature_cap(curvature: f64, max_ang_acc: f64) -> f64 {
    let curvature = curvature.abs();
    if curvature < CURVATURE_EPSILON {
        f64::INFINITY
    } else {
        max_ang_acc / curvature
    }
}

/// Lower every speed that can't be reached from the previous sample
fn forward_pass(plan: &mut [(f64, f64)], max_acc: f64) {
    for i in 1..plan.len() {
        let (prev_s, prev_vel) = plan[i - 1];
        let (s, vel) = plan[i];

        let reachable = 2f64.mul_add(max_acc * (s - prev_s), prev_vel * prev_vel).sqrt();
        plan[i].1 = vel.min(reachable);
    }
}

/// Lower every speed that can't be brought down to the next sample's speed
fn backward_pass(plan: &mut [(f64, f64)], max_acc: f64) {
    for i in (1..plan.len()).rev() {
        let (s, vel) = plan[i];
        let (prev_s, prev_vel) = plan[i - 1];

        let reachable = 2f64.mul_add(max_acc * (s - prev_s), vel * vel).sqrt();
        plan[i - 1].1 = prev_vel.min(reachable);
    }
}

/// A time-parameterized speed plan over a [`Path`]
///
/// To construct this type, use [`MotionProfile::make_profile`].
#[derive(Clone, Debug)]
pub struct MotionProfile<'a> {
    path: &'a Path,
    constraints: Constraints,
    displacement_profile: Vec<(f64, f64)>,
    time_profile_abs: Vec<TimedState>,
    time_profile_x: Vec<TimedState>,
    time_profile_y: Vec<TimedState>,
    heading_profile: Vec<(f64, f64)>,
    duration: f64,
}

impl<'a> MotionProfile<'a> {
    /// Plan the fastest speed profile along `path` that respects `constraints`
    ///
    /// Speeds are first capped by `max_vel` and the curvature at evenly spaced samples,
    /// then lowered by a forward and a backward pass until every step is reachable under
    /// `max_acc`, and finally expanded into time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for invalid constraints or options, or when two
    /// consecutive samples both have a speed of zero. Failures from path queries are
    /// propagated unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use quintic_paths::{Constraints, MotionProfile, Path, ProfileOptions};
    ///
    /// let path = Path::new(&[DVec2::ZERO, DVec2::new(50., 0.)], &[0., 0.], None).unwrap();
    /// let constraints = Constraints::new(30., 40., 10., 10.);
    /// let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();
    ///
    /// let peak = profile.displacement_profile().iter().map(|&(_, v)| v).fold(0., f64::max);
    /// assert!(peak <= 30.);
    /// assert_eq!(profile.time_profile_abs().last().unwrap().1.velocity, 0.);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn make_profile(path: &'a Path, constraints: Constraints, options: ProfileOptions) -> Result<Self> {
        constraints.validate()?;
        options.validate()?;

        let count = options.sample_count;
        let last = count - 1;
        let length = path.length();

        // stage 1: curvature and speed caps
        let mut plan = Vec::with_capacity(count);
        let mut locations: Vec<(&Segment, f64)> = Vec::with_capacity(count);

        for i in 0..count {
            let s = if i == last {
                length
            } else {
                length * i as f64 / last as f64
            };

            let (segment, t) = path.parameter_at(s)?;
            let cap = curvature_cap(segment.curvature_at_parameter(t), constraints.max_ang_acc);

            plan.push((s, constraints.max_vel.min(cap)));
            locations.push((segment, t));
        }

        if options.start_vel > plan[0].1 {
            warn!(start_vel = options.start_vel, cap = plan[0].1, "start speed exceeds the speed cap");
        }
        if options.end_vel > plan[last].1 {
            warn!(end_vel = options.end_vel, cap = plan[last].1, "end speed exceeds the speed cap");
        }

        plan[0].1 = options.start_vel;
        plan[last].1 = options.end_vel;

        // stages 2 and 3: acceleration limits
        forward_pass(&mut plan, constraints.max_acc);
        backward_pass(&mut plan, constraints.max_acc);

        // stage 4: expansion into time
        let mut time_profile_abs = Vec::with_capacity(count);
        let mut time_profile_x = Vec::with_capacity(count);
        let mut time_profile_y = Vec::with_capacity(count);
        let mut heading_profile = Vec::with_capacity(count);

        let mut time = 0.;
        for (i, (&(s, vel), &(segment, t))) in plan.iter().zip(&locations).enumerate() {
            let acc = if i == 0 {
                options.start_acc
            } else {
                let prev_vel = plan[i - 1].1;
                if vel + prev_vel <= 0. {
                    return Err(Error::invalid(format!(
                        "the robot would be stationary between displacements {} and {s}",
                        plan[i - 1].0
                    )));
                }

                let dt = 2. * (s - plan[i - 1].0) / (vel + prev_vel);
                time += dt;

                (vel - prev_vel) / dt
            };

            let point = segment.point_at_parameter(t);
            let tangent = segment.first_derivative_at_parameter(t).normalize();

            time_profile_abs.push((time, KinematicState::new(s, vel, acc)));
            time_profile_x.push((time, KinematicState::new(point.x, vel * tangent.x, acc * tangent.x)));
            time_profile_y.push((time, KinematicState::new(point.y, vel * tangent.y, acc * tangent.y)));
            heading_profile.push((time, segment.heading_at_parameter(t)?));
        }

        let peak_speed = plan.iter().map(|&(_, vel)| vel).fold(0., f64::max);
        debug!(samples = count, duration = time, peak_speed, "motion profile planned");

        Ok(Self {
            path,
            constraints,
            displacement_profile: plan,
            time_profile_abs,
            time_profile_x,
            time_profile_y,
            heading_profile,
            duration: time,
        })
    }

    /// The path being followed
    #[inline]
    #[must_use]
    pub const fn path(&self) -> &'a Path {
        self.path
    }

    /// The limits the profile was planned with
    #[inline]
    #[must_use]
    pub const fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// `(displacement, speed)` pairs, ordered by displacement
    #[inline]
    #[must_use]
    pub fn displacement_profile(&self) -> &[(f64, f64)] {
        &self.displacement_profile
    }

    /// Displacement, speed and acceleration along the path over time
    #[inline]
    #[must_use]
    pub fn time_profile_abs(&self) -> &[TimedState] {
        &self.time_profile_abs
    }

    /// x coordinate, velocity and acceleration over time
    #[inline]
    #[must_use]
    pub fn time_profile_x(&self) -> &[TimedState] {
        &self.time_profile_x
    }

    /// y coordinate, velocity and acceleration over time
    #[inline]
    #[must_use]
    pub fn time_profile_y(&self) -> &[TimedState] {
        &self.time_profile_y
    }

    /// `(time, heading)` pairs, heading in radians
    #[inline]
    #[must_use]
    pub fn heading_profile(&self) -> &[(f64, f64)] {
        &self.heading_profile
    }

    /// The time it takes to follow the whole path
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evenly_spaced(speeds: &[f64], step: f64) -> Vec<(f64, f64)> {
        speeds.iter().enumerate().map(|(i, &v)| (i as f64 * step, v)).collect()
    }

    #[test]
    fn straight_lines_are_uncapped() {
        assert_eq!(curvature_cap(0., 5.), f64::INFINITY);
        assert_eq!(curvature_cap(-0.000_5, 5.), f64::INFINITY);
        assert_eq!(curvature_cap(-0.5, 5.), 10.);
    }

    #[test]
    fn forward_pass_limits_acceleration() {
        let mut plan = evenly_spaced(&[0., 100., 100., 1.], 2.);
        forward_pass(&mut plan, 1.);

        assert_eq!(plan[1].1, 2.);
        assert!((plan[2].1 - 8f64.sqrt()).abs() < 1e-12);
        assert_eq!(plan[3].1, 1.);
    }

    #[test]
    fn backward_pass_limits_deceleration() {
        let mut plan = evenly_spaced(&[100., 100., 0.], 2.);
        backward_pass(&mut plan, 1.);

        assert_eq!(plan[2].1, 0.);
        assert_eq!(plan[1].1, 2.);
        assert!((plan[0].1 - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn passes_never_raise_speeds() {
        let speeds = [3., 0.5, 4., 4., 0.25, 2.];
        let mut plan = evenly_spaced(&speeds, 0.1);
        forward_pass(&mut plan, 2.);
        backward_pass(&mut plan, 2.);

        for (&(_, planned), &requested) in plan.iter().zip(&speeds) {
            assert!(planned <= requested);
        }
    }

    #[test]
    fn rejects_bad_constraints() {
        assert!(Constraints::new(1., 1., 1., 1.).validate().is_ok());
        assert!(matches!(Constraints::new(0., 1., 1., 1.).validate(), Err(Error::InvalidInput(_))));
        assert!(matches!(Constraints::new(1., f64::INFINITY, 1., 1.).validate(), Err(Error::InvalidInput(_))));
        assert!(matches!(Constraints::new(1., 1., 1., f64::NAN).validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_bad_options() {
        assert!(ProfileOptions::default().validate().is_ok());
        assert!(ProfileOptions::default().sample_count(1).validate().is_err());
        assert!(ProfileOptions::default().start_vel(-1.).validate().is_err());
        assert!(ProfileOptions::default().end_vel(f64::NAN).validate().is_err());
    }
}
