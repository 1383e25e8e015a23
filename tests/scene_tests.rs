// Host-side tests for the card scenes: stairs, railway and formations.

use cardstack_core::*;
use glam::Vec2;

fn frame_time(frame: u64) -> FrameTime {
    FrameTime {
        dt: 1.0 / 60.0,
        elapsed: frame as f32 / 60.0,
        frame,
    }
}

fn run(scene: &mut dyn Scene, from: u64, frames: u64) -> Vec<SceneEvent> {
    let mut events = Vec::new();
    for f in from..from + frames {
        scene.update(frame_time(f));
        events.extend(scene.drain_events());
    }
    events
}

fn wheel(scene: &mut dyn Scene, delta_y: f32, times: usize) {
    for _ in 0..times {
        scene.handle_input(&SceneInput::Wheel { delta_y });
    }
}

// ---------------- Stairs ----------------

#[test]
fn stair_floor_label_follows_scroll() {
    let mut stairs = StairScene::new(StairConfig::default()).unwrap();
    assert_eq!(stairs.label().as_deref(), Some("1F"));

    wheel(&mut stairs, 1.0, 25);
    assert_eq!(stairs.target_scroll(), 50.0);
    run(&mut stairs, 0, 400);
    assert_eq!(stairs.scroll(), 50.0);
    assert_eq!(stairs.floor_label(), "16F");
}

#[test]
fn stair_scroll_is_clamped() {
    let mut stairs = StairScene::new(StairConfig::default()).unwrap();
    wheel(&mut stairs, -1.0, 10);
    assert_eq!(stairs.target_scroll(), 0.0);
    wheel(&mut stairs, 1.0, 80);
    assert_eq!(stairs.target_scroll(), SCROLL_MAX);
}

#[test]
fn stair_burst_fires_once_until_rearmed() {
    let mut stairs = StairScene::new(StairConfig::default()).unwrap();
    wheel(&mut stairs, 1.0, 50);
    let events = run(&mut stairs, 0, 400);
    assert_eq!(events, vec![SceneEvent::Burst]);

    // dip below the burst mark but not below the re-arm mark
    wheel(&mut stairs, -1.0, 6);
    run(&mut stairs, 400, 300);
    wheel(&mut stairs, 1.0, 6);
    assert!(run(&mut stairs, 700, 300).is_empty());

    // below the re-arm mark and back up
    wheel(&mut stairs, -1.0, 15);
    run(&mut stairs, 1000, 300);
    wheel(&mut stairs, 1.0, 15);
    assert_eq!(run(&mut stairs, 1300, 300), vec![SceneEvent::Burst]);
}

#[test]
fn stair_touch_scrolls_by_drag_distance() {
    let mut stairs = StairScene::new(StairConfig::default()).unwrap();
    let at = |y: f32| TouchPoints::from_slice(&[Vec2::new(100.0, y)]);
    stairs.handle_input(&SceneInput::TouchStart { points: at(400.0) });
    stairs.handle_input(&SceneInput::TouchMove { points: at(300.0) });
    assert!((stairs.target_scroll() - 100.0 * STAIR_TOUCH_SCALE).abs() < 1e-4);
    stairs.handle_input(&SceneInput::TouchEnd);
    stairs.handle_input(&SceneInput::TouchMove { points: at(0.0) });
    assert!((stairs.target_scroll() - 100.0 * STAIR_TOUCH_SCALE).abs() < 1e-4);
}

#[test]
fn clicking_a_picture_frame_opens_media() {
    let mut stairs = StairScene::new(StairConfig::default()).unwrap();
    stairs.resize(800, 600);
    stairs.update(frame_time(0));

    let cam = stairs.camera().clone();
    let visible = stairs
        .frames()
        .iter()
        .find_map(|f| {
            let ndc = cam.project(f.center)?;
            (ndc.x.abs() < 0.9 && ndc.y.abs() < 0.9 && (0.0..1.0).contains(&ndc.z))
                .then_some(ndc)
        })
        .expect("a picture frame in view from the bottom step");
    let px = Vec2::new((visible.x + 1.0) * 400.0, (1.0 - visible.y) * 300.0);

    stairs.handle_input(&SceneInput::Click { pos: px });
    let events = stairs.drain_events();
    assert!(
        matches!(events.as_slice(), [SceneEvent::OpenMedia { .. }]),
        "{events:?}"
    );

    let mut bare = StairScene::new(StairConfig {
        frame_steps: Vec::new(),
        ..StairConfig::default()
    })
    .unwrap();
    bare.resize(800, 600);
    bare.handle_input(&SceneInput::Click { pos: px });
    assert!(bare.drain_events().is_empty());
}

#[test]
fn stair_frames_map_to_media_slots() {
    let stairs = StairScene::new(StairConfig::default()).unwrap();
    assert_eq!(stairs.frames().len(), STAIR_FRAME_STEPS.len());
    for f in stairs.frames() {
        assert!(f.slot < STAIR_FRAME_STEPS.len());
    }
    let bad = StairConfig {
        burst_at: 50.0,
        burst_rearm_below: 80.0,
        ..StairConfig::default()
    };
    assert!(StairScene::new(bad).is_err());
}

// ---------------- Railway ----------------

#[test]
fn railway_sounds_horn_at_the_station() {
    let mut railway = RailwayScene::new(RailwayConfig::default()).unwrap();
    let events = run(&mut railway, 0, 400);
    assert_eq!(events, vec![SceneEvent::Horn]);
}

#[test]
fn muted_horn_stays_silent() {
    let mut railway = RailwayScene::new(RailwayConfig::default()).unwrap();
    railway.handle_input(&SceneInput::Key(KeyAction::ToggleHorn));
    assert!(!railway.horn_enabled());
    assert!(run(&mut railway, 0, 400).is_empty());
}

#[test]
fn railway_keys_change_the_world() {
    let mut railway = RailwayScene::new(RailwayConfig::default()).unwrap();
    assert_eq!(railway.label().as_deref(), Some("3 wagons · slow"));

    for action in [KeyAction::AddWagon, KeyAction::AddWagon, KeyAction::ToggleSpeed] {
        railway.handle_input(&SceneInput::Key(action));
    }
    assert_eq!(railway.label().as_deref(), Some("5 wagons · fast"));

    railway.handle_input(&SceneInput::Key(KeyAction::TogglePause));
    assert_eq!(railway.label().as_deref(), Some("5 wagons · paused"));
    let before = railway.train().progress();
    run(&mut railway, 0, 30);
    assert_eq!(railway.train().progress(), before);

    railway.handle_input(&SceneInput::Key(KeyAction::ToggleDayNight));
    assert!(railway.is_night());
    let mut frame = SceneFrame::default();
    railway.frame(&mut frame);
    assert_eq!(frame.clear_color, [0x1a as f32 / 255.0, 0x1a as f32 / 255.0, 0x3e as f32 / 255.0, 1.0]);
    assert!(!frame.markers.is_empty());
}

#[test]
fn follow_mode_tracks_the_locomotive() {
    let mut railway = RailwayScene::new(RailwayConfig::default()).unwrap();
    railway.handle_input(&SceneInput::Key(KeyAction::FollowTrain));
    assert!(railway.follows_train());
    run(&mut railway, 0, 10);
    let loco = railway.track().evaluate(railway.train().progress()).position;
    assert!(railway.camera().target.distance(loco) < 1e-3);

    railway.handle_input(&SceneInput::Key(KeyAction::FollowTrain));
    run(&mut railway, 10, 1);
    assert_eq!(railway.camera().target, glam::Vec3::ZERO);
}

#[test]
fn drag_and_pinch_move_the_orbit() {
    let mut railway = RailwayScene::new(RailwayConfig::default()).unwrap();
    let theta = railway.rig().target_theta();
    railway.handle_input(&SceneInput::PointerDown { pos: Vec2::new(100.0, 100.0) });
    railway.handle_input(&SceneInput::PointerMove { pos: Vec2::new(150.0, 100.0) });
    railway.handle_input(&SceneInput::PointerUp { pos: Vec2::new(150.0, 100.0) });
    assert!(railway.rig().target_theta() < theta);

    // hover after release does not drag
    let theta = railway.rig().target_theta();
    railway.handle_input(&SceneInput::PointerMove { pos: Vec2::new(400.0, 100.0) });
    assert_eq!(railway.rig().target_theta(), theta);

    let radius = railway.rig().target_radius();
    let two = |d: f32| TouchPoints::from_slice(&[Vec2::ZERO, Vec2::new(d, 0.0)]);
    railway.handle_input(&SceneInput::TouchStart { points: two(100.0) });
    railway.handle_input(&SceneInput::TouchMove { points: two(200.0) });
    assert!(railway.rig().target_radius() < radius, "spread zooms in");
}

#[test]
fn pupils_follow_the_pointer() {
    let look = pupil_offset(Vec2::new(1.0, 0.0), Vec2::ZERO, 1.0);
    assert!((look - Vec2::new(0.175, 0.0)).length() < 1e-5);
    let far = pupil_offset(Vec2::new(100.0, 0.0), Vec2::ZERO, 1.0);
    assert!((far.length() - 0.35).abs() < 1e-5, "capped");
}

#[test]
fn same_seed_builds_the_same_flock() {
    let a = RailwayScene::new(RailwayConfig::default()).unwrap();
    let b = RailwayScene::new(RailwayConfig::default()).unwrap();
    let pa: Vec<_> = a.flock().sheep().iter().map(|s| s.position).collect();
    let pb: Vec<_> = b.flock().sheep().iter().map(|s| s.position).collect();
    assert_eq!(pa, pb);
}

// ---------------- Formations ----------------

#[test]
fn formation_wheel_has_a_cooldown() {
    let mut scene = FormationScene::new(FormationConfig::default()).unwrap();
    wheel(&mut scene, 1.0, 5);
    assert_eq!(scene.target_scroll(), FORMATION_WHEEL_STEP);

    scene.update(frame_time(6));
    wheel(&mut scene, 1.0, 1);
    assert_eq!(scene.target_scroll(), 2.0 * FORMATION_WHEEL_STEP);

    scene.update(frame_time(12));
    scene.handle_input(&SceneInput::Key(KeyAction::ScrollUp));
    assert_eq!(scene.target_scroll(), FORMATION_WHEEL_STEP);
}

#[test]
fn formation_label_tracks_scroll() {
    let mut scene = FormationScene::new(FormationConfig::default()).unwrap();
    scene.update(frame_time(0));
    assert_eq!(scene.label().as_deref(), Some("SPHERE"));

    let at = |y: f32| TouchPoints::from_slice(&[Vec2::new(0.0, y)]);
    scene.handle_input(&SceneInput::TouchStart { points: at(1000.0) });
    scene.handle_input(&SceneInput::TouchMove { points: at(0.0) });
    assert_eq!(scene.target_scroll(), SCROLL_MAX);
    run(&mut scene, 1, 400);
    assert_eq!(scene.label().as_deref(), Some("SCATTER"));

    let mut frame = SceneFrame::default();
    scene.frame(&mut frame);
    assert!(frame.markers.len() >= FORMATION_NODE_COUNT);
}

// ---------------- Flip board ----------------

fn flip_board() -> FlipScene {
    let mut scene = FlipScene::new(FlipConfig::default()).unwrap();
    scene.resize(800, 600);
    scene
}

fn click(scene: &mut dyn Scene, pos: Vec2) {
    scene.handle_input(&SceneInput::Click { pos });
}

#[test]
fn flip_targets_are_clamped_to_the_board() {
    let mut scene = flip_board();
    assert_eq!(scene.board_point(Vec2::new(-50.0, -50.0)), Vec2::splat(AVATAR_TARGET_MIN));

    click(&mut scene, Vec2::new(800.0, 600.0));
    assert_eq!(
        scene.state(),
        AvatarState::Moving { target: Vec2::splat(AVATAR_TARGET_MAX) }
    );
}

#[test]
fn first_click_after_opening_is_ignored() {
    let mut scene = flip_board();
    scene.fullscreen_entered();
    click(&mut scene, Vec2::new(400.0, 300.0));
    assert_eq!(scene.state(), AvatarState::Idle);

    click(&mut scene, Vec2::new(400.0, 300.0));
    assert!(matches!(scene.state(), AvatarState::Moving { .. }));
}

#[test]
fn avatar_snaps_onto_its_target() {
    let mut scene = flip_board();
    assert_eq!(scene.avatar(), Vec2::from(AVATAR_START));
    click(&mut scene, Vec2::new(400.0, 300.0));

    run(&mut scene, 0, 10);
    let partway = scene.avatar();
    assert!(partway.y > AVATAR_START[1] && partway.y < 0.5, "{partway:?}");

    run(&mut scene, 10, 300);
    assert_eq!(scene.state(), AvatarState::Idle);
    assert_eq!(scene.avatar(), Vec2::new(0.5, 0.5));
}

#[test]
fn flipped_items_stay_flipped() {
    let mut scene = flip_board();
    run(&mut scene, 0, 30);
    assert_eq!(scene.flipped_count(), 0, "idle avatar flips nothing");

    let target = scene.pixel_of(scene.items()[4].center);
    click(&mut scene, target);
    run(&mut scene, 30, 300);
    assert!(scene.is_flipped(4));
    assert!(!scene.is_flipped(8), "far corner was never touched");
    let flipped = scene.flipped_count();

    // walk away to the top-left corner
    click(&mut scene, Vec2::ZERO);
    run(&mut scene, 330, 300);
    assert_eq!(scene.avatar(), Vec2::splat(AVATAR_TARGET_MIN));
    assert!(scene.is_flipped(4));
    assert!(!scene.is_flipped(8));
    assert!(scene.flipped_count() >= flipped);
    assert_eq!(
        scene.label(),
        Some(format!("{}/9 flipped", scene.flipped_count()))
    );
}

#[test]
fn board_overlap_includes_touching_edges() {
    let a = BoardRect::new(Vec2::ZERO, Vec2::splat(0.5));
    assert!(a.overlaps(&BoardRect::new(Vec2::new(1.0, 0.0), Vec2::splat(0.5))));
    assert!(!a.overlaps(&BoardRect::new(Vec2::new(1.1, 0.0), Vec2::splat(0.5))));
    assert!(!a.overlaps(&BoardRect::new(Vec2::new(0.0, -1.2), Vec2::splat(0.5))));
}

#[test]
fn empty_board_is_rejected() {
    let bad = FlipConfig {
        columns: 0,
        ..FlipConfig::default()
    };
    assert!(FlipScene::new(bad).is_err());
}
