//! Vertical card deck: wheel accumulator, navigation and fullscreen state.
//!
//! Input methods only record intent; [`Deck::update`] advances timers and
//! smoothing once per frame and reports what changed.

use crate::constants::*;
use crate::smoothing::Smoothed;
use glam::Vec2;
use smallvec::SmallVec;

/// What a card hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    /// Avatar walking over a board of flip cards.
    FlipBoard,
    Stairs,
    Railway,
    Formation,
}

impl CardKind {
    pub fn title(self) -> &'static str {
        match self {
            CardKind::FlipBoard => "Flip board",
            CardKind::Stairs => "Spiral stairs",
            CardKind::Railway => "Toy railway",
            CardKind::Formation => "Formations",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeckState {
    Browsing,
    Transitioning {
        from: usize,
        to: usize,
        direction: NavDirection,
        remaining: f32,
    },
    /// `opening` counts down the expand animation.
    Fullscreen { opening: f32 },
    Closing { remaining: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeckEvent {
    NavigationStarted { from: usize, to: usize },
    NavigationFinished { current: usize },
    FullscreenEntered { index: usize },
    FullscreenExited { index: usize },
}

/// Transform of the current card while browsing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    /// Screen-space offset in CSS pixels.
    pub translate: Vec2,
    /// Depth offset in CSS pixels; negative pushes away.
    pub z: f32,
    pub scale: f32,
    pub shadow: Vec2,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            z: 0.0,
            scale: 1.0,
            shadow: Vec2::new(0.0, DECK_SHADOW_DROP),
        }
    }
}

/// Next card rising in front while the user pulls down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewTransform {
    pub z: f32,
    /// Vertical offset as a percentage of the card height.
    pub y_percent: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl PreviewTransform {
    pub fn at(progress: f32) -> Self {
        Self {
            z: 150.0 - progress * 80.0,
            y_percent: 60.0 - progress * 30.0,
            scale: 1.15 - progress * 0.08,
            opacity: (progress * 3.0).min(1.0),
        }
    }
}

#[derive(Clone, Debug)]
struct WheelPull {
    accumulator: f32,
    quiet: f32,
    y: Smoothed,
    z: Smoothed,
    scale: Smoothed,
    amount: f32,
}

impl Default for WheelPull {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            quiet: 0.0,
            y: Smoothed::new(0.0, DECK_SMOOTHING),
            z: Smoothed::new(0.0, DECK_SMOOTHING),
            scale: Smoothed::new(1.0, DECK_SMOOTHING),
            amount: 0.0,
        }
    }
}

impl WheelPull {
    fn reset_targets(&mut self) {
        self.accumulator = 0.0;
        self.quiet = 0.0;
        self.amount = 0.0;
        self.y.set_target(0.0);
        self.z.set_target(0.0);
        self.scale.set_target(1.0);
    }

    fn snap_rest(&mut self) {
        self.reset_targets();
        self.y.snap_to(0.0);
        self.z.snap_to(0.0);
        self.scale.snap_to(1.0);
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<CardKind>,
    current: usize,
    state: DeckState,
    pull: WheelPull,
    preview: Smoothed,
    mouse_x: Smoothed,
    mouse_y: Smoothed,
    touch_start_y: Option<f32>,
    events: Vec<DeckEvent>,
}

impl Deck {
    pub fn new(cards: Vec<CardKind>) -> Self {
        Self {
            cards,
            current: 0,
            state: DeckState::Browsing,
            pull: WheelPull::default(),
            preview: Smoothed::new(0.0, DECK_PREVIEW_SMOOTHING).with_range(0.0, 1.0),
            mouse_x: Smoothed::new(0.0, DECK_SMOOTHING),
            mouse_y: Smoothed::new(0.0, DECK_SMOOTHING),
            touch_start_y: None,
            events: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_kind(&self) -> Option<CardKind> {
        self.cards.get(self.current).copied()
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self.state, DeckState::Fullscreen { .. })
    }

    fn is_browsing(&self) -> bool {
        matches!(self.state, DeckState::Browsing)
    }

    /// Accumulated wheel pull, `|accumulator| / threshold`.
    pub fn pull_amount(&self) -> f32 {
        self.pull.amount
    }

    /// Document title: one filled square for the current card.
    pub fn title(&self) -> String {
        (0..self.cards.len())
            .map(|i| if i == self.current { '■' } else { '□' })
            .collect()
    }

    /// Feed a wheel delta while browsing. Past the threshold this navigates.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.is_browsing() || !delta_y.is_finite() {
            return;
        }
        let pull = &mut self.pull;
        pull.accumulator += delta_y * DECK_WHEEL_GAIN;
        pull.quiet = 0.0;
        let abs = pull.accumulator.abs();
        let progress = abs / DECK_WHEEL_THRESHOLD;
        if pull.accumulator > 0.0 {
            pull.y.set_target(abs * 0.4);
            pull.z.set_target(-abs * 1.2);
            pull.scale.set_target(1.0 - progress * 0.08);
        } else {
            pull.y.set_target(abs * 0.5);
            pull.z.set_target(abs * 1.5);
            pull.scale.set_target(1.0);
        }
        pull.amount = progress;

        if abs > DECK_WHEEL_THRESHOLD {
            let down = pull.accumulator > 0.0;
            pull.reset_targets();
            self.step_by(if down { 1 } else { -1 });
        }
    }

    pub fn touch_start(&mut self, y: f32) {
        self.touch_start_y = Some(y);
    }

    /// A vertical swipe longer than the threshold navigates one card.
    pub fn touch_end(&mut self, y: f32) {
        let Some(start) = self.touch_start_y.take() else {
            return;
        };
        if !self.is_browsing() {
            return;
        }
        let delta = start - y;
        if delta.abs() > DECK_SWIPE_MIN_PX {
            self.step_by(if delta > 0.0 { 1 } else { -1 });
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.mouse_x.set_target(x);
        self.mouse_y.set_target(y);
    }

    /// Relative move; out-of-range targets are ignored.
    pub fn step_by(&mut self, delta: i32) -> bool {
        let target = self.current as i64 + delta as i64;
        if target < 0 {
            return false;
        }
        self.navigate_to(target as usize)
    }

    /// Start a transition to `index`. Ignored while another transition runs,
    /// in fullscreen, when out of range, or when already there.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        if !self.is_browsing() || index >= self.cards.len() || index == self.current {
            return false;
        }
        let from = self.current;
        let direction = if index > from {
            NavDirection::Down
        } else {
            NavDirection::Up
        };
        self.current = index;
        self.state = DeckState::Transitioning {
            from,
            to: index,
            direction,
            remaining: DECK_TRANSITION_SEC,
        };
        log::info!("[deck] {from} -> {index} ({direction:?})");
        self.events
            .push(DeckEvent::NavigationStarted { from, to: index });
        true
    }

    /// Expand the current card. Only from rest.
    pub fn enter_fullscreen(&mut self) -> bool {
        if !self.is_browsing() || self.cards.is_empty() {
            return false;
        }
        self.pull.snap_rest();
        self.preview.snap_to(0.0);
        self.state = DeckState::Fullscreen {
            opening: DECK_FULLSCREEN_SEC,
        };
        self.events.push(DeckEvent::FullscreenEntered {
            index: self.current,
        });
        true
    }

    pub fn exit_fullscreen(&mut self) -> bool {
        if !self.is_fullscreen() {
            return false;
        }
        self.state = DeckState::Closing {
            remaining: DECK_FULLSCREEN_SEC,
        };
        true
    }

    /// Advance timers and smoothing by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<DeckEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.mouse_x.step();
        self.mouse_y.step();

        match &mut self.state {
            DeckState::Browsing => {
                if self.pull.accumulator != 0.0 {
                    self.pull.quiet += dt;
                    if self.pull.quiet >= DECK_WHEEL_QUIET_SEC {
                        self.pull.reset_targets();
                    }
                }
            }
            DeckState::Transitioning { remaining, .. } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.state = DeckState::Browsing;
                    self.pull.snap_rest();
                    self.preview.snap_to(0.0);
                    self.events.push(DeckEvent::NavigationFinished {
                        current: self.current,
                    });
                }
            }
            DeckState::Fullscreen { opening } => {
                *opening = (*opening - dt).max(0.0);
            }
            DeckState::Closing { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.state = DeckState::Browsing;
                    self.events.push(DeckEvent::FullscreenExited {
                        index: self.current,
                    });
                }
            }
        }

        self.pull.y.step();
        self.pull.z.step();
        self.pull.scale.step();

        let previewing = self.is_browsing()
            && self.pull.accumulator > DECK_PREVIEW_MIN_PULL
            && self.current + 1 < self.cards.len();
        self.preview
            .set_target(if previewing { self.pull.amount } else { 0.0 });
        self.preview.step();

        std::mem::take(&mut self.events)
    }

    /// Parallax and pull-back transform of the current card.
    ///
    /// `card_center` is the card's centre and `viewport` the window size,
    /// both in CSS pixels.
    pub fn card_transform(&self, card_center: Vec2, viewport: Vec2) -> CardTransform {
        if !self.is_browsing() {
            return CardTransform::default();
        }
        let delta = Vec2::new(self.mouse_x.value(), self.mouse_y.value()) - card_center;
        let max_dist = viewport.length() / 2.0;
        let ratio = if max_dist > 0.0 {
            (delta.length() / max_dist).min(1.0)
        } else {
            0.0
        };
        let angle = delta.y.atan2(delta.x);
        let dir = Vec2::new(angle.cos(), angle.sin());
        let push = ratio * DECK_PARALLAX_PUSH;
        CardTransform {
            translate: -dir * push + Vec2::new(0.0, self.pull.y.value()),
            z: self.pull.z.value(),
            scale: self.pull.scale.value(),
            shadow: dir * DECK_SHADOW_SPREAD * ratio + Vec2::new(0.0, DECK_SHADOW_DROP),
        }
    }

    /// Preview of the next card, when one is being pulled in.
    pub fn preview(&self) -> Option<(usize, PreviewTransform)> {
        let p = self.preview.value();
        (p > 0.0 && self.current + 1 < self.cards.len())
            .then(|| (self.current + 1, PreviewTransform::at(p)))
    }

    /// Cards whose scenes should be ticked this frame: the current one plus a
    /// card being previewed or transitioned away from. Everything else sleeps.
    pub fn live_cards(&self) -> SmallVec<[usize; 2]> {
        let mut live = SmallVec::new();
        if self.cards.is_empty() {
            return live;
        }
        live.push(self.current);
        match self.state {
            DeckState::Transitioning { from, .. } => live.push(from),
            DeckState::Browsing => {
                if let Some((next, _)) = self.preview() {
                    live.push(next);
                }
            }
            _ => {}
        }
        live
    }
}
