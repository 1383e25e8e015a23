// Host-side tests for input routing and ticking of the deck app.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod app {
    include!("../src/app.rs");
}

use app::*;
use cardstack_core::*;
use glam::Vec2;
use input::KeyCommand;

const FRAME: f64 = 1.0 / 60.0;

struct Harness {
    app: App,
    now: f64,
    events: Vec<AppEvent>,
}

impl Harness {
    fn new() -> Self {
        let mut app = App::new(&DEFAULT_CARDS, 5).unwrap();
        app.resize(800, 600, 1.0);
        app.start();
        Self {
            app,
            now: 0.0,
            events: Vec::new(),
        }
    }

    fn frames(&mut self, n: usize) {
        for _ in 0..n {
            let events = self.app.tick(self.now).unwrap();
            self.events.extend(events);
            self.now += FRAME;
        }
    }

    /// Navigate to `index`, let the transition finish and go fullscreen.
    fn open(&mut self, index: usize) {
        assert!(self.app.navigate_to(index));
        self.frames(80);
        self.app.command(KeyCommand::EnterFullscreen);
        assert!(self.app.deck().is_fullscreen());
    }

    fn flip(&self) -> &FlipScene {
        match self.app.card(0) {
            Some(CardScene::FlipBoard(f)) => f,
            _ => panic!("card 0 is not the flip board"),
        }
    }

    fn tap(&mut self, pos: Vec2) {
        let points = TouchPoints::from_slice(&[pos]);
        self.app.handle_input(&SceneInput::TouchStart { points });
        self.app.handle_input(&SceneInput::TouchEnd);
    }

    fn railway(&self) -> &RailwayScene {
        match self.app.card(2) {
            Some(CardScene::Railway(r)) => r,
            _ => panic!("card 2 is not the railway"),
        }
    }

    fn stairs(&self) -> &StairScene {
        match self.app.card(1) {
            Some(CardScene::Stairs(s)) => s,
            _ => panic!("card 1 is not the stairs"),
        }
    }
}

#[test]
fn stopped_app_does_not_tick() {
    let mut app = App::new(&DEFAULT_CARDS, 1).unwrap();
    assert!(!app.is_running());
    assert!(app.tick(0.0).is_none());
    assert!(app.start());
    assert!(app.tick(0.0).is_some());
    assert!(app.stop());
    assert!(app.tick(1.0).is_none());
}

#[test]
fn cards_are_built_in_order() {
    let h = Harness::new();
    let kinds: Vec<_> = (0..4).filter_map(|i| h.app.card(i)).map(CardScene::kind).collect();
    assert_eq!(kinds, DEFAULT_CARDS.to_vec());
    assert_eq!(h.app.label().as_deref(), Some("0/9 flipped"));
}

#[test]
fn browsing_wheel_drives_the_deck() {
    let mut h = Harness::new();
    h.app.handle_input(&SceneInput::Wheel { delta_y: 400.0 });
    h.frames(1);
    assert!(h
        .events
        .contains(&AppEvent::Deck(DeckEvent::NavigationStarted { from: 0, to: 1 })));
    assert_eq!(h.stairs().target_scroll(), 0.0, "stairs must not scroll while browsing");
}

#[test]
fn fullscreen_wheel_drives_the_scene() {
    let mut h = Harness::new();
    h.open(1);
    h.app.handle_input(&SceneInput::Wheel { delta_y: 100.0 });
    assert_eq!(h.stairs().target_scroll(), STAIR_WHEEL_STEP);
    assert_eq!(h.app.deck().current(), 1);
    h.frames(5);
    assert_eq!(h.app.label().as_deref(), Some("1F"));
}

#[test]
fn click_while_browsing_opens_the_card() {
    let mut h = Harness::new();
    let pos = Vec2::new(400.0, 300.0);
    h.app.handle_input(&SceneInput::PointerDown { pos });
    h.app.handle_input(&SceneInput::PointerUp { pos: pos + Vec2::new(2.0, 0.0) });
    assert!(h.app.deck().is_fullscreen());

    // the board ignores the first click after opening, then walks
    h.app.handle_input(&SceneInput::Click { pos });
    assert_eq!(h.flip().state(), AvatarState::Idle);
    h.app.handle_input(&SceneInput::Click { pos });
    assert!(matches!(h.flip().state(), AvatarState::Moving { .. }));
}

#[test]
fn tap_while_browsing_opens_the_card() {
    let mut h = Harness::new();
    h.tap(Vec2::new(400.0, 300.0));
    h.frames(5);
    assert!(h.app.deck().is_fullscreen(), "state={:?}", h.app.deck().state());
}

#[test]
fn swipe_and_pinch_are_not_taps() {
    let mut h = Harness::new();
    let one = |y: f32| TouchPoints::from_slice(&[Vec2::new(400.0, y)]);
    h.app.handle_input(&SceneInput::TouchStart { points: one(300.0) });
    h.app.handle_input(&SceneInput::TouchMove { points: one(280.0) });
    h.app.handle_input(&SceneInput::TouchEnd);
    assert!(!h.app.deck().is_fullscreen());

    let two = TouchPoints::from_slice(&[Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0)]);
    h.app.handle_input(&SceneInput::TouchStart { points: two });
    h.app.handle_input(&SceneInput::TouchEnd);
    assert!(!h.app.deck().is_fullscreen());

    h.app.handle_input(&SceneInput::TouchStart { points: one(300.0) });
    h.app.cancel_tap();
    h.app.handle_input(&SceneInput::TouchEnd);
    assert!(!h.app.deck().is_fullscreen());
}

#[test]
fn tap_on_a_picture_frame_opens_media() {
    let mut h = Harness::new();
    h.open(1);
    h.frames(1);
    let cam = h.stairs().camera().clone();
    let ndc = h
        .stairs()
        .frames()
        .iter()
        .find_map(|f| {
            let ndc = cam.project(f.center)?;
            (ndc.x.abs() < 0.9 && ndc.y.abs() < 0.9 && (0.0..1.0).contains(&ndc.z)).then_some(ndc)
        })
        .expect("a picture frame in view from the bottom step");
    h.tap(Vec2::new((ndc.x + 1.0) * 400.0, (1.0 - ndc.y) * 300.0));
    h.frames(1);
    assert!(h.events.iter().any(|e| matches!(
        e,
        AppEvent::Scene { card: 1, event: SceneEvent::OpenMedia { .. } }
    )));
}

#[test]
fn drag_while_browsing_is_not_a_click() {
    let mut h = Harness::new();
    h.app.handle_input(&SceneInput::PointerDown { pos: Vec2::new(100.0, 100.0) });
    h.app.handle_input(&SceneInput::PointerUp { pos: Vec2::new(300.0, 100.0) });
    assert!(!h.app.deck().is_fullscreen());
}

#[test]
fn scene_keys_only_apply_in_fullscreen() {
    let mut h = Harness::new();
    assert!(h.app.navigate_to(2));
    h.frames(80);
    h.app.command(KeyCommand::Scene(KeyAction::AddWagon));
    assert_eq!(h.railway().train().wagon_count(), TRAIN_START_WAGONS);

    h.app.command(KeyCommand::EnterFullscreen);
    h.app.command(KeyCommand::Scene(KeyAction::AddWagon));
    assert_eq!(h.railway().train().wagon_count(), TRAIN_START_WAGONS + 1);
    assert_eq!(h.app.label().as_deref(), Some("4 wagons · slow"));

    h.app.command(KeyCommand::ExitFullscreen);
    h.frames(60);
    assert!(h
        .events
        .contains(&AppEvent::Deck(DeckEvent::FullscreenExited { index: 2 })));
    assert_eq!(h.app.deck().state(), DeckState::Browsing);
}

#[test]
fn only_live_cards_are_ticked() {
    let mut h = Harness::new();
    h.frames(120);
    assert_eq!(h.railway().train().progress(), 0.0, "railway sleeps off-screen");

    h.open(2);
    h.frames(10);
    assert!(h.railway().train().progress() > 0.0);
}

#[test]
fn railway_horn_reaches_the_host() {
    let mut h = Harness::new();
    h.open(2);
    h.frames(400);
    let horns = h
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Scene { card: 2, event: SceneEvent::Horn }))
        .count();
    assert_eq!(horns, 1);
}

#[test]
fn keyboard_navigation_is_bounded() {
    let mut h = Harness::new();
    h.app.command(KeyCommand::Navigate(-1));
    assert_eq!(h.app.deck().current(), 0);
    for _ in 0..6 {
        h.app.command(KeyCommand::Navigate(1));
        h.frames(80);
    }
    assert_eq!(h.app.deck().current(), 3);
}

#[test]
fn parallax_uses_css_pixels() {
    let mut h = Harness::new();
    h.app.resize(1600, 1200, 2.0);
    // right edge of the canvas, vertically centred
    h.app.handle_input(&SceneInput::PointerMove { pos: Vec2::new(1600.0, 600.0) });
    h.frames(200);
    let t = h.app.card_transform();
    // pointer sits 400 css px right of centre, 0.8 of the half diagonal
    assert!((t.translate.x + 0.8 * DECK_PARALLAX_PUSH).abs() < 0.1, "{t:?}");
    assert!(t.translate.y.abs() < 0.1);
}

#[test]
fn flip_board_renders_items_and_avatar() {
    let mut h = Harness::new();
    h.frames(1);
    let mut backend = RecordingBackend::default();
    h.app.render(&mut backend).unwrap();
    assert_eq!(backend.frames, 1);
    assert_eq!(backend.last_markers, h.flip().items().len() + 1);
    let eye = backend.last_eye.unwrap();
    assert!(eye.z > 10.0 && eye.x == 0.0 && eye.y == 0.0, "{eye:?}");
}

#[test]
fn scenes_render_through_their_camera() {
    let mut h = Harness::new();
    h.open(3);
    h.frames(2);
    let mut backend = RecordingBackend::default();
    h.app.render(&mut backend).unwrap();
    assert!(backend.last_markers >= FORMATION_NODE_COUNT);
    let eye = backend.last_eye.unwrap();
    assert!(eye.length() > 10.0, "formation camera orbits outside the field");
}
