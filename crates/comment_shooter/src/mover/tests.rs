use bevy::prelude::*;

use super::{CommentMover, FloatMotion, MoverSettings, ViewportBounds};
use crate::rng::GameRng;

#[test]
fn moves_left_at_scaled_speed() {
    let mut mover = CommentMover::new(100.0, Vec2::new(240.0, 0.0));
    let mut translation = Vec3::new(240.0, 0.0, 0.0);

    mover.step(&mut translation, 0.5, 1.0);
    assert!((translation.x - 190.0).abs() < 1e-4, "half a second at 100 units/s");

    mover.step(&mut translation, 0.5, 1.2);
    assert!((translation.x - 130.0).abs() < 1e-4, "multiplier speeds it up");
    assert!(translation.y.abs() < f32::EPSILON, "no float configured, height unchanged");
}

#[test]
fn float_stays_within_amplitude() {
    let mut mover = CommentMover::new(100.0, Vec2::new(0.0, 50.0)).with_float(FloatMotion {
        amplitude: 6.0,
        frequency: 1.5,
        phase: 0.3,
    });
    let mut translation = Vec3::new(0.0, 50.0, 0.0);

    for _ in 0..120 {
        mover.step(&mut translation, 1.0 / 60.0, 1.0);
        assert!((translation.y - 50.0).abs() <= 6.0 + 1e-4, "float bounded by amplitude");
    }
}

#[test]
fn left_bound_is_edge_triggered() {
    let mut mover = CommentMover::new(100.0, Vec2::new(240.0, 0.0));

    assert!(!mover.crossed_left_bound(-200.0, -240.0), "still inside");
    assert!(mover.crossed_left_bound(-241.0, -240.0), "first crossing reported");
    assert!(!mover.crossed_left_bound(-300.0, -240.0), "never reported twice");
}

#[test]
fn progress_and_time_to_bound() {
    let mover = CommentMover::new(100.0, Vec2::new(200.0, 0.0));

    assert!(mover.progress(200.0, -200.0).abs() < f32::EPSILON, "starts at zero");
    assert!((mover.progress(0.0, -200.0) - 0.5).abs() < 1e-4, "halfway");
    assert!((mover.progress(-500.0, -200.0) - 1.0).abs() < f32::EPSILON, "clamped at one");
    assert!((mover.time_to_left_bound(0.0, -200.0, 1.0) - 2.0).abs() < 1e-4, "200 units at 100/s");
    assert!((mover.time_to_left_bound(0.0, -200.0, 2.0) - 1.0).abs() < 1e-4, "faster when inflamed");
    assert!(mover.time_to_left_bound(-300.0, -200.0, 1.0).abs() < f32::EPSILON, "already past");
}

#[test]
fn rolled_speed_stays_in_variation_band() {
    let settings = MoverSettings::default();
    let mut rng = GameRng::with_seed(7);

    for _ in 0..500 {
        let speed = settings.roll_speed(&mut rng);
        assert!(speed >= 90.0 - 1e-3 && speed <= 150.0 + 1e-3, "speed {speed} within 120 +/- 25%");
    }
}

#[test]
fn left_bound_sits_outside_viewport() {
    let settings = MoverSettings::default();
    let bounds = ViewportBounds::default();

    assert!((settings.left_bound(&bounds) - (-240.0)).abs() < f32::EPSILON, "60 units past the left edge");
}
