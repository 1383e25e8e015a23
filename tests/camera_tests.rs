// Host-side tests for the orbit and stair camera rigs.

use cardstack_core::*;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

#[test]
fn orbit_phi_and_radius_are_clamped() {
    let mut rig = OrbitRig::default();
    rig.drag(0.0, 100_000.0);
    assert!((rig.target_phi() - ORBIT_PHI_MAX).abs() < 1e-6);
    rig.drag(0.0, -100_000.0);
    assert!((rig.target_phi() - ORBIT_PHI_MIN).abs() < 1e-6);

    rig.wheel(1e6);
    assert!((rig.target_radius() - ORBIT_RADIUS_MAX).abs() < 1e-4);
    rig.pinch(1e6);
    assert!((rig.target_radius() - ORBIT_RADIUS_MIN).abs() < 1e-4);

    for _ in 0..1000 {
        rig.step(1.0 / 60.0);
        assert!(rig.phi() >= ORBIT_PHI_MIN - 1e-5 && rig.phi() <= ORBIT_PHI_MAX + 1e-5);
        assert!(rig.radius() >= ORBIT_RADIUS_MIN - 1e-3);
    }
}

#[test]
fn drag_left_turns_theta_positive() {
    let mut rig = OrbitRig::default();
    let before = rig.target_theta();
    rig.drag(-100.0, 0.0);
    assert!((rig.target_theta() - before - 100.0 * DRAG_THETA_PER_PX).abs() < 1e-5);
}

#[test]
fn rotate_steps_cycle_through_presets() {
    let mut rig = OrbitRig::default();
    assert_eq!(rig.rotate_step(), 1);
    assert!((rig.target_theta() - (-FRAC_PI_2 + PI / 3.0)).abs() < 1e-5);
    for _ in 0..5 {
        rig.rotate_step();
    }
    assert!((rig.target_theta() + FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn orbit_eye_sits_at_radius_from_look_at() {
    let mut rig = OrbitRig::default();
    let focus = Vec3::new(5.0, 0.0, -3.0);
    rig.set_look_at(LookAt::Point(focus));
    let mut cam = Camera::new(45.0, 0.5, 350.0);
    rig.apply(&mut cam);
    assert_eq!(cam.target, focus);
    assert!((cam.eye.distance(focus) - ORBIT_DEFAULT_RADIUS).abs() < 1e-3);
    assert!(cam.eye.y > focus.y);
}

#[test]
fn orbit_offset_matches_spherical_form() {
    let o = orbit_offset(0.0, FRAC_PI_2, 10.0);
    assert!((o - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    let o = orbit_offset(FRAC_PI_2, FRAC_PI_2, 10.0);
    assert!((o - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn ray_sphere_hits_and_misses() {
    let hit = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 1.0);
    assert!((hit.unwrap() - 9.0).abs() < 1e-4);
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 1.0), None);
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, -10.0), 1.0), None);
    // origin inside the sphere
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::ZERO, 5.0), None);
}

#[test]
fn centre_pixel_ray_points_at_target() {
    let mut cam = Camera::new(60.0, 0.1, 100.0);
    cam.set_viewport(800, 600);
    let (origin, dir) = cam.ray_from_pixel(Vec2::new(400.0, 300.0), 800.0, 600.0);
    assert_eq!(origin, cam.eye);
    assert!(dir.dot(Vec3::NEG_Z) > 0.999);

    let ndc = cam.project(Vec3::ZERO).unwrap();
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none(), "behind the eye");
}

#[test]
fn zero_viewport_keeps_aspect() {
    let mut cam = Camera::new(60.0, 0.1, 100.0);
    cam.set_viewport(1600, 800);
    cam.set_viewport(0, 800);
    assert!((cam.aspect - 2.0).abs() < 1e-6);
}

#[test]
fn stair_camera_walks_inside_the_outer_edge() {
    let stairs = SpiralStaircase::default();
    let rig = StairCamera::new(&stairs);
    let eye = rig.eye(&stairs, 0.0);
    assert!((eye - Vec3::new(4.8, 1.9, 0.0)).length() < 1e-4, "{eye:?}");

    let mut cam = Camera::new(70.0, 0.1, 150.0);
    rig.apply(&stairs, 10.0, &mut cam);
    assert!((cam.eye.y - stairs.tread_height(10.0)).abs() < 1e-4);
    assert!(cam.target.y > cam.eye.y, "looks up the stairs");
}

#[test]
fn auto_orbit_advances_theta_with_time() {
    let mut rig = OrbitRig::default();
    rig.set_auto_orbit(Some(0.5));
    rig.step(2.0);
    assert!((rig.target_theta() - (ORBIT_DEFAULT_THETA + 1.0)).abs() < 1e-5);

    rig.set_auto_orbit(Some(f32::NAN));
    let before = rig.target_theta();
    rig.step(2.0);
    assert_eq!(rig.target_theta(), before);
}
