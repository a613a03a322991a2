use core::hint::black_box;
use glam::DVec2;
use quintic_paths::{Constraints, MotionProfile, PathBuilder, ProfileOptions, Trajectory};
use rand::Rng;

fn main() {
    let runs = 1_000;
    let range = 100.;

    let mut thread_rng = rand::thread_rng();

    for _ in 0..runs {
        let mut builder = PathBuilder::new(DVec2::ZERO, thread_rng.gen_range(-45_f64..45.));
        let mut position = DVec2::ZERO;

        for _ in 0..thread_rng.gen_range(1..6) {
            position += DVec2::new(thread_rng.gen_range(5_f64..range), thread_rng.gen_range(-range..range));
            builder = builder.point_constant_heading(position, thread_rng.gen_range(-45_f64..45.));
        }

        let Ok(path) = builder.build() else {
            continue;
        };

        let constraints = Constraints::new(
            thread_rng.gen_range(5_f64..50.),
            thread_rng.gen_range(5_f64..50.),
            6.,
            thread_rng.gen_range(1_f64..20.),
        );

        let Ok(profile) = MotionProfile::make_profile(&path, constraints, ProfileOptions::default()) else {
            continue;
        };

        let trajectory = Trajectory::new(&profile);
        let time = thread_rng.gen_range(0_f64..=trajectory.duration());
        let _ = black_box(trajectory.pose_at(time));
    }
}
