use crate::constants::CLICK_SLOP_PX;
use crate::input::{ClickTracker, KeyCommand};
use cardstack_core::*;
use glam::Vec2;

pub const DEFAULT_CARDS: [CardKind; 4] = [
    CardKind::FlipBoard,
    CardKind::Stairs,
    CardKind::Railway,
    CardKind::Formation,
];

/// A card and the scene it hosts.
pub enum CardScene {
    FlipBoard(FlipScene),
    Stairs(StairScene),
    Railway(RailwayScene),
    Formation(FormationScene),
}

impl CardScene {
    pub fn build(kind: CardKind, seed: u64) -> anyhow::Result<Self> {
        Ok(match kind {
            CardKind::FlipBoard => CardScene::FlipBoard(FlipScene::new(FlipConfig {
                seed,
                ..FlipConfig::default()
            })?),
            CardKind::Stairs => CardScene::Stairs(StairScene::new(StairConfig::default())?),
            CardKind::Railway => CardScene::Railway(RailwayScene::new(RailwayConfig {
                seed,
                ..RailwayConfig::default()
            })?),
            CardKind::Formation => {
                CardScene::Formation(FormationScene::new(FormationConfig::default())?)
            }
        })
    }

    pub fn kind(&self) -> CardKind {
        match self {
            CardScene::FlipBoard(_) => CardKind::FlipBoard,
            CardScene::Stairs(_) => CardKind::Stairs,
            CardScene::Railway(_) => CardKind::Railway,
            CardScene::Formation(_) => CardKind::Formation,
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        match self {
            CardScene::FlipBoard(s) => s,
            CardScene::Stairs(s) => s,
            CardScene::Railway(s) => s,
            CardScene::Formation(s) => s,
        }
    }

    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            CardScene::FlipBoard(s) => s,
            CardScene::Stairs(s) => s,
            CardScene::Railway(s) => s,
            CardScene::Formation(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Deck(DeckEvent),
    Scene { card: usize, event: SceneEvent },
}

/// Deck plus card scenes, driven by the host's frame loop and input.
///
/// Scene input arrives in canvas backing pixels; the deck works in CSS
/// pixels, so positions are divided by the pixel ratio on the way in.
pub struct App {
    deck: Deck,
    cards: Vec<CardScene>,
    frame_loop: FrameLoop,
    frame: SceneFrame,
    size: Vec2,
    pixel_ratio: f32,
    click: ClickTracker,
    tap: ClickTracker,
    last_touch: Option<Vec2>,
}

impl App {
    pub fn new(cards: &[CardKind], seed: u64) -> anyhow::Result<Self> {
        let scenes = cards
            .iter()
            .map(|&kind| CardScene::build(kind, seed))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            deck: Deck::new(cards.to_vec()),
            cards: scenes,
            frame_loop: FrameLoop::default(),
            frame: SceneFrame::default(),
            size: Vec2::ONE,
            pixel_ratio: 1.0,
            click: ClickTracker::new(CLICK_SLOP_PX),
            tap: ClickTracker::new(CLICK_SLOP_PX),
            last_touch: None,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn card(&self, index: usize) -> Option<&CardScene> {
        self.cards.get(index)
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn start(&mut self) -> bool {
        self.frame_loop.start()
    }

    pub fn stop(&mut self) -> bool {
        self.frame_loop.stop()
    }

    /// Canvas backing size and device pixel ratio.
    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        for scene in self.cards.iter_mut().map(CardScene::scene_mut) {
            scene.resize(width, height);
        }
    }

    /// One frame. `None` while the loop is stopped.
    pub fn tick(&mut self, now_secs: f64) -> Option<Vec<AppEvent>> {
        let time = self.frame_loop.tick(now_secs)?;
        let mut events: Vec<AppEvent> = self
            .deck
            .update(time.dt)
            .into_iter()
            .map(AppEvent::Deck)
            .collect();
        for card in self.deck.live_cards() {
            if let Some(scene) = self.cards.get_mut(card).map(CardScene::scene_mut) {
                scene.update(time);
                events.extend(
                    scene
                        .drain_events()
                        .into_iter()
                        .map(|event| AppEvent::Scene { card, event }),
                );
            }
        }
        Some(events)
    }

    fn current_scene_mut(&mut self) -> Option<&mut dyn Scene> {
        let current = self.deck.current();
        self.cards.get_mut(current).map(CardScene::scene_mut)
    }

    fn send_to_scene(&mut self, input: &SceneInput) {
        if let Some(scene) = self.current_scene_mut() {
            scene.handle_input(input);
        }
    }

    fn click(&mut self, pos: Vec2) {
        if self.deck.is_fullscreen() {
            self.send_to_scene(&SceneInput::Click { pos });
        } else {
            self.enter_fullscreen();
        }
    }

    fn enter_fullscreen(&mut self) -> bool {
        if !self.deck.enter_fullscreen() {
            return false;
        }
        if let Some(kind) = self.deck.current_kind() {
            log::info!("[deck] opened {}", kind.title());
        }
        if let Some(scene) = self.current_scene_mut() {
            scene.fullscreen_entered();
        }
        true
    }

    /// Drop a pending tap, e.g. when the browser cancels the touch.
    pub fn cancel_tap(&mut self) {
        self.tap.cancel();
    }

    /// Route host input: the deck while browsing, the current scene in fullscreen.
    pub fn handle_input(&mut self, input: &SceneInput) {
        let fullscreen = self.deck.is_fullscreen();
        match input {
            SceneInput::Wheel { delta_y } => {
                if fullscreen {
                    self.send_to_scene(input);
                } else {
                    self.deck.wheel(*delta_y);
                }
            }
            SceneInput::TouchStart { points } => {
                self.last_touch = points.first().copied();
                match points.as_slice() {
                    [p] => self.tap.press(*p),
                    _ => self.tap.cancel(),
                }
                if fullscreen {
                    self.send_to_scene(input);
                } else if let Some(p) = self.last_touch {
                    self.deck.touch_start(p.y / self.pixel_ratio);
                }
            }
            SceneInput::TouchMove { points } => {
                if let Some(p) = points.first() {
                    self.last_touch = Some(*p);
                }
                if points.len() > 1 {
                    self.tap.cancel();
                }
                if fullscreen {
                    self.send_to_scene(input);
                }
            }
            SceneInput::TouchEnd => {
                if fullscreen {
                    self.send_to_scene(input);
                } else if let Some(p) = self.last_touch {
                    self.deck.touch_end(p.y / self.pixel_ratio);
                }
                // a finger that barely moved is a tap
                if let Some(p) = self.last_touch.take() {
                    if self.tap.release(p) {
                        self.click(p);
                    }
                }
            }
            SceneInput::PointerDown { pos } => {
                self.click.press(*pos);
                if fullscreen {
                    self.send_to_scene(input);
                }
            }
            SceneInput::PointerMove { pos } => {
                let css = *pos / self.pixel_ratio;
                self.deck.pointer_move(css.x, css.y);
                self.send_to_scene(input);
            }
            SceneInput::PointerUp { pos } => {
                if fullscreen {
                    self.send_to_scene(input);
                }
                if self.click.release(*pos) {
                    self.click(*pos);
                }
            }
            SceneInput::Click { pos } => self.click(*pos),
            SceneInput::Key(_) => {
                if fullscreen {
                    self.send_to_scene(input);
                }
            }
        }
    }

    pub fn command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Navigate(delta) => {
                self.deck.step_by(delta);
            }
            KeyCommand::EnterFullscreen => {
                self.enter_fullscreen();
            }
            KeyCommand::ExitFullscreen => {
                self.deck.exit_fullscreen();
            }
            KeyCommand::Scene(action) => self.handle_input(&SceneInput::Key(action)),
        }
    }

    pub fn navigate_to(&mut self, index: usize) -> bool {
        self.deck.navigate_to(index)
    }

    pub fn exit_fullscreen(&mut self) -> bool {
        self.deck.exit_fullscreen()
    }

    /// Parallax transform of the current card in CSS pixels.
    pub fn card_transform(&self) -> CardTransform {
        let css = self.size / self.pixel_ratio;
        self.deck.card_transform(css * 0.5, css)
    }

    /// HUD text of the current card's scene.
    pub fn label(&self) -> Option<String> {
        self.cards
            .get(self.deck.current())
            .and_then(|card| card.scene().label())
    }

    /// Draw the current card.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> anyhow::Result<()> {
        let Some(card) = self.cards.get(self.deck.current()) else {
            return Ok(());
        };
        let scene = card.scene();
        scene.frame(&mut self.frame);
        backend.render(&self.frame, scene.camera())
    }
}
