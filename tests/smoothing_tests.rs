// Host-side tests for per-frame smoothing and the frame clock.

use cardstack_core::*;
use std::f32::consts::{PI, TAU};

#[test]
fn smoothed_converges_without_overshoot() {
    let mut s = Smoothed::new(0.0, 0.1);
    s.set_target(10.0);
    let mut prev = s.value();
    for frame in 0..300 {
        let v = s.step();
        assert!(v >= prev, "went backwards at frame {frame}");
        assert!(v <= 10.0, "overshot at frame {frame}");
        prev = v;
    }
    assert!((s.value() - 10.0).abs() < 1e-3);
}

#[test]
fn smoothed_target_is_clamped_to_range() {
    let mut s = Smoothed::new(0.0, 0.5).with_range(0.0, 100.0);
    s.nudge(250.0);
    assert_eq!(s.target(), 100.0);
    s.nudge(-1000.0);
    assert_eq!(s.target(), 0.0);
    s.set_target(f32::NAN);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn smoothed_settles_onto_target() {
    let mut s = Smoothed::new(0.0, 0.06).with_settle(0.01);
    s.set_target(1.0);
    let mut frames = 0;
    while !s.is_settled() {
        s.step();
        frames += 1;
        assert!(frames < 500, "never settled");
    }
    s.step();
    assert_eq!(s.value(), 1.0);
}

#[test]
fn inverted_range_is_ignored() {
    let s = Smoothed::new(5.0, 0.1).with_range(10.0, 0.0);
    assert_eq!(s.range(), (f32::NEG_INFINITY, f32::INFINITY));
    assert_eq!(s.value(), 5.0);
}

#[test]
fn angles_take_the_short_way_round() {
    let a = smooth_angle(0.1, TAU - 0.1, 0.5);
    assert!(a.abs() < 1e-5, "got {a}");
    assert!((shortest_angle_delta(0.0, 3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
    assert!((shortest_angle_delta(-PI, PI)).abs() < 1e-5);
}

#[test]
fn wrapping_stays_in_range() {
    assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
    assert!((wrap_unit(3.5) - 0.5).abs() < 1e-6);
    assert!(wrap_unit(-1e-9) < 1.0);
    for a in [-10.0f32, -PI, 0.0, 7.0, 100.0] {
        let w = wrap_angle(a);
        assert!((0.0..TAU).contains(&w), "wrap_angle({a}) = {w}");
    }
}

#[test]
fn smoothstep_is_clamped_and_symmetric() {
    assert_eq!(smoothstep(-1.0), 0.0);
    assert_eq!(smoothstep(2.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-6);
}

#[test]
fn frame_clock_clamps_deltas() {
    let mut clock = FrameClock::default();
    assert_eq!(clock.tick(10.0).dt, 0.0);
    let t = clock.tick(10.016);
    assert!((t.dt - 0.016).abs() < 1e-4);
    assert_eq!(t.frame, 2);
    assert!((clock.tick(20.0).dt - MAX_FRAME_DT_SEC).abs() < 1e-6);
    assert_eq!(clock.tick(19.0).dt, 0.0, "time went backwards");
    assert!((clock.elapsed() - (0.016 + MAX_FRAME_DT_SEC)).abs() < 1e-4);
}

#[test]
fn frame_loop_lifecycle() {
    let mut lp = FrameLoop::default();
    assert_eq!(lp.state(), LoopState::Stopped);
    assert!(lp.tick(0.0).is_none());

    assert!(lp.start());
    assert!(!lp.start(), "second start is a no-op");
    assert_eq!(lp.tick(1.0).map(|t| t.dt), Some(0.0));
    assert!(lp.tick(1.02).is_some());

    assert!(lp.stop());
    assert!(!lp.stop());
    assert!(lp.tick(5.0).is_none());

    // resuming does not see the pause
    assert!(lp.start());
    assert_eq!(lp.tick(9.0).map(|t| t.dt), Some(0.0));
}
