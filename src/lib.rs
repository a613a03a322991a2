//! Quintic Hermite spline paths through waypoints, and curvature-limited motion profiles
//! that turn them into time-indexed trajectories.
//!
//! ```
//! use glam::DVec2;
//! use quintic_paths::{Constraints, MotionProfile, PathBuilder, ProfileOptions, Trajectory};
//!
//! let path = PathBuilder::new(DVec2::new(0., 0.), 90.)
//!     .point_constant_heading(DVec2::new(20., 20.), 0.)
//!     .point_constant_heading(DVec2::new(40., 0.), -90.)
//!     .build()
//!     .unwrap();
//!
//! let constraints = Constraints::new(30., 40., 10., 10.);
//! let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();
//! let trajectory = Trajectory::new(&profile);
//!
//! assert!(trajectory.pose_at(profile.duration()).pos().distance(DVec2::new(40., 0.)) < 1e-6);
//! ```

mod base;
mod builder;
mod heading;
mod lut;
mod path;
mod polynomial;
mod profile;
mod trajectory;

pub mod math;
pub mod numeric;
pub mod segment;

pub use base::*;
pub use builder::PathBuilder;
pub use heading::{HeadingInterpolator, HeadingSpec, InterpolationMode};
pub use lut::InterpLUT;
pub use path::Path;
pub use polynomial::{Polynomial, COEFFS};
pub use profile::{Constraints, KinematicState, MotionProfile, ProfileOptions, TimedState};
pub use segment::Segment;
pub use trajectory::Trajectory;

pub extern crate glam;
