use glam::DVec2;
use quintic_paths::{
    Constraints, Error, InterpLUT, InterpolationMode, MotionProfile, Path, PathBuilder, ProfileOptions, Trajectory,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const EPSILON: f64 = 1e-9;

fn arc() -> Path {
    let waypoints = [DVec2::new(0., 0.), DVec2::new(20., 20.), DVec2::new(40., 0.)];
    Path::new(&waypoints, &[90., 0., -90.], None).unwrap()
}

fn line(length: f64) -> Path {
    Path::new(&[DVec2::ZERO, DVec2::new(length, 0.)], &[0., 0.], None).unwrap()
}

fn assert_feasible(profile: &MotionProfile, max_acc: f64) {
    for pair in profile.displacement_profile().windows(2) {
        let (prev_s, prev_vel) = pair[0];
        let (s, vel) = pair[1];
        let reach = 2. * max_acc * (s - prev_s);

        assert!(vel * vel <= prev_vel * prev_vel + reach + EPSILON, "can't accelerate to {vel} at {s}");
        assert!(prev_vel * prev_vel <= vel * vel + reach + EPSILON, "can't decelerate from {prev_vel} at {prev_s}");
    }
}

#[test]
fn straight_line_is_a_symmetric_trapezoid() {
    let path = line(100.);
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();

    let speeds: Vec<f64> = profile.displacement_profile().iter().map(|&(_, vel)| vel).collect();
    let peak = speeds.iter().copied().fold(0., f64::max);

    // 30² / (2 · 40) = 11.25 to reach full speed, well within 100
    assert_eq!(peak, 30.);
    assert!(speeds.iter().all(|&vel| vel <= 30.));

    for (vel, mirrored) in speeds.iter().zip(speeds.iter().rev()) {
        assert!((vel - mirrored).abs() < 1e-6, "{vel} != {mirrored}");
    }

    assert_feasible(&profile, 40.);
}

#[test]
fn short_line_is_a_triangle() {
    let path = line(10.);
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default().sample_count(101)).unwrap();

    // accelerate for 5 then decelerate for 5: sqrt(2 · 40 · 5) = 20
    let (s, peak) = profile.displacement_profile()[50];
    assert!((s - 5.).abs() < 1e-9);
    assert!((peak - 20.).abs() < 1e-6);

    // a triangle takes 2 · sqrt(2 · 5 / 40) seconds
    assert!((profile.duration() - 1.).abs() < 1e-3);
}

#[test]
fn respects_caps_and_acceleration() {
    let path = arc();
    let constraints = Constraints::new(30., 40., 10., 5.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();

    assert_feasible(&profile, constraints.max_acc);

    for &(s, vel) in profile.displacement_profile() {
        let curvature = path.curvature_at(s).unwrap().abs();
        let cap = if curvature < 0.001 {
            constraints.max_vel
        } else {
            constraints.max_vel.min(constraints.max_ang_acc / curvature)
        };

        assert!(vel <= cap + EPSILON, "{vel} exceeds {cap} at {s}");
    }
}

#[test]
fn boundary_speeds_and_duration() {
    let path = arc();
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();

    let abs = profile.time_profile_abs();
    assert_eq!(abs.len(), 200);
    assert_eq!(abs[0].0, 0.);
    assert_eq!(abs[0].1.velocity, 0.);
    assert_eq!(abs[abs.len() - 1].1.velocity, 0.);
    assert_eq!(abs[abs.len() - 1].0, profile.duration());
    assert!(abs.windows(2).all(|pair| pair[0].0 < pair[1].0));

    assert_eq!(abs[0].1.position, 0.);
    assert_eq!(abs[abs.len() - 1].1.position, path.length());
}

#[test]
fn axis_profiles_follow_the_path() {
    let path = arc();
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();

    let samples = profile.time_profile_abs().iter().zip(profile.time_profile_x()).zip(profile.time_profile_y());
    for ((abs, x), y) in samples {
        assert_eq!(abs.0, x.0);
        assert_eq!(abs.0, y.0);

        let velocity = DVec2::new(x.1.velocity, y.1.velocity);
        assert!((velocity.length() - abs.1.velocity).abs() < EPSILON);

        let expected = path.point_at(abs.1.position).unwrap();
        assert!(DVec2::new(x.1.position, y.1.position).distance(expected) < EPSILON);
        assert_eq!(x.1.jerk, None);
    }

    let last = profile.time_profile_x().last().unwrap();
    assert!((last.1.position - 40.).abs() < 1e-6);
}

#[test]
fn boundary_accelerations_are_recorded() {
    let path = line(50.);
    let constraints = Constraints::new(30., 40., 10., 10.);
    let options = ProfileOptions::default().start_vel(2.).end_vel(1.).start_acc(3.).end_acc(-4.);
    let profile = MotionProfile::make_profile(&path, constraints, options).unwrap();

    let abs = profile.time_profile_abs();
    assert_eq!(abs[0].1.velocity, 2.);
    assert_eq!(abs[0].1.acceleration, 3.);
    assert_eq!(abs[abs.len() - 1].1.velocity, 1.);

    // the last step still brakes at the limit; end_acc doesn't override it
    let (prev_time, prev) = abs[abs.len() - 2];
    let (time, last) = abs[abs.len() - 1];
    let finite_difference = (last.velocity - prev.velocity) / (time - prev_time);
    assert!((last.acceleration - finite_difference).abs() < 1e-6);
    assert!((last.acceleration + 40.).abs() < 1e-6);

    // the line runs along x, so the x axis carries everything
    assert!((profile.time_profile_x()[0].1.acceleration - 3.).abs() < EPSILON);
    assert!(profile.time_profile_y()[0].1.acceleration.abs() < EPSILON);
}

#[test]
fn heading_profile_starts_at_the_path_heading() {
    let path = PathBuilder::new(DVec2::ZERO, 0.)
        .start_heading(30.)
        .point_linear_heading(DVec2::new(20., 5.), 0., 90.)
        .build()
        .unwrap();
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();

    let headings = profile.heading_profile();
    assert_eq!(headings.len(), profile.time_profile_abs().len());
    assert!((headings[0].1 - 30f64.to_radians()).abs() < 1e-12);
    assert!((headings[headings.len() - 1].1 - 90f64.to_radians()).abs() < 1e-12);
    assert!(headings.windows(2).all(|pair| pair[0].1 <= pair[1].1));
}

#[test]
fn invalid_profiles() {
    let path = line(10.);
    let constraints = Constraints::new(30., 40., 10., 10.);

    let one_sample = MotionProfile::make_profile(&path, constraints, ProfileOptions::default().sample_count(1));
    assert!(matches!(one_sample, Err(Error::InvalidInput(_))));

    let no_speed = MotionProfile::make_profile(&path, Constraints::new(0., 40., 10., 10.), ProfileOptions::default());
    assert!(matches!(no_speed, Err(Error::InvalidInput(_))));

    // two samples that are both at rest
    let stationary = MotionProfile::make_profile(&path, constraints, ProfileOptions::default().sample_count(2));
    assert!(matches!(stationary, Err(Error::InvalidInput(_))));

    let tangent_heading = PathBuilder::new(DVec2::ZERO, 0.)
        .point_with_heading(DVec2::new(10., 0.), 0., 0., InterpolationMode::Tangent)
        .build()
        .unwrap();
    let unimplemented = MotionProfile::make_profile(&tangent_heading, constraints, ProfileOptions::default());
    assert!(matches!(unimplemented, Err(Error::Unimplemented(_))));
}

#[test]
fn random_paths_are_feasible() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let mut builder = PathBuilder::new(DVec2::ZERO, 0.);
        let mut position = DVec2::ZERO;
        for _ in 0..rng.gen_range(1..4) {
            position += DVec2::new(rng.gen_range(10_f64..30.), rng.gen_range(-20_f64..20.));
            builder = builder.point_constant_heading(position, rng.gen_range(-30_f64..30.));
        }

        let path = builder.build().unwrap();
        let constraints = Constraints::new(
            rng.gen_range(5_f64..50.),
            rng.gen_range(5_f64..50.),
            10.,
            rng.gen_range(1_f64..20.),
        );
        let options = ProfileOptions::default().sample_count(rng.gen_range(20..100));
        let profile = MotionProfile::make_profile(&path, constraints, options).unwrap();

        assert_feasible(&profile, constraints.max_acc);
        assert!(profile.duration() > 0.);
        assert_eq!(profile.constraints(), constraints);
        assert!(core::ptr::eq(profile.path(), &path));
    }
}

#[test]
fn lut_clamps_and_interpolates() {
    let lut = InterpLUT::new(vec![0., 1., 2., 4.], vec![5., 7., 3., 3.]);

    assert_eq!(lut.lookup(-1e9), 5.);
    assert_eq!(lut.lookup(0.), 5.);
    assert_eq!(lut.lookup(1.), 7.);
    assert_eq!(lut.lookup(2.), 3.);
    assert_eq!(lut.lookup(4.), 3.);
    assert_eq!(lut.lookup(1e9), 3.);

    assert_eq!(lut.lookup(0.5), 6.);
    assert_eq!(lut.lookup(1.25), 6.);
    assert_eq!(lut.lookup(3.), 3.);

    assert_eq!(InterpLUT::default().lookup(1.), 0.);
    assert_eq!(lut.lookup(f64::NAN), 5.);
}

#[test]
fn trajectory_samples_the_profile() {
    let path = arc();
    let constraints = Constraints::new(30., 40., 10., 10.);
    let profile = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()).unwrap();
    let trajectory = Trajectory::new(&profile);

    assert_eq!(trajectory.duration(), profile.duration());
    assert_eq!(trajectory.pose_at(-1.), trajectory.pose_at(0.));
    assert_eq!(trajectory.pose_at(profile.duration() + 1.), trajectory.pose_at(profile.duration()));
    assert!(trajectory.pose_at(profile.duration()).pos().distance(DVec2::new(40., 0.)) < 1e-6);
    assert_eq!(trajectory.speed_at(0.), 0.);
    assert_eq!(trajectory.pose_at(f64::NAN), trajectory.pose_at(0.));

    for (time, state) in profile.time_profile_abs() {
        assert_eq!(trajectory.speed_at(*time), state.velocity);
        assert!((trajectory.velocity_at(*time).length() - state.velocity).abs() < EPSILON);
    }

    // the midpoint of the arc is reached half way through
    let apex = trajectory.pose_at(profile.duration() / 2.);
    assert!(apex.pos().distance(DVec2::new(20., 20.)) < 0.5);
}
