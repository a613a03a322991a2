use crate::{InterpLUT, MotionProfile, Pose, TimedState};
use glam::DVec2;

fn lut_of(profile: &[TimedState], value: impl Fn(&TimedState) -> f64) -> InterpLUT {
    InterpLUT::new(profile.iter().map(|state| state.0).collect(), profile.iter().map(value).collect())
}

/// Time-indexed lookups over a planned [`MotionProfile`]
///
/// Queries before 0 or after [`Trajectory::duration`] return the state at that end.
#[derive(Clone, Debug)]
pub struct Trajectory {
    x: InterpLUT,
    y: InterpLUT,
    heading: InterpLUT,
    vx: InterpLUT,
    vy: InterpLUT,
    speed: InterpLUT,
    duration: f64,
}

impl Trajectory {
    /// Build the lookup tables of a profile
    #[must_use]
    pub fn new(profile: &MotionProfile) -> Self {
        let (times, headings): (Vec<f64>, Vec<f64>) = profile.heading_profile().iter().copied().unzip();

        Self {
            x: lut_of(profile.time_profile_x(), |(_, state)| state.position),
            y: lut_of(profile.time_profile_y(), |(_, state)| state.position),
            heading: InterpLUT::new(times, headings),
            vx: lut_of(profile.time_profile_x(), |(_, state)| state.velocity),
            vy: lut_of(profile.time_profile_y(), |(_, state)| state.velocity),
            speed: lut_of(profile.time_profile_abs(), |(_, state)| state.velocity),
            duration: profile.duration(),
        }
    }

    /// The time it takes to follow the trajectory
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Where the robot should be, and which way it should face, at `time`
    #[must_use]
    pub fn pose_at(&self, time: f64) -> Pose {
        Pose::new(self.x.lookup(time), self.y.lookup(time), self.heading.lookup(time))
    }

    /// The robot's velocity at `time`
    #[must_use]
    pub fn velocity_at(&self, time: f64) -> DVec2 {
        DVec2::new(self.vx.lookup(time), self.vy.lookup(time))
    }

    /// The robot's speed along the path at `time`
    #[inline]
    #[must_use]
    pub fn speed_at(&self, time: f64) -> f64 {
        self.speed.lookup(time)
    }
}
