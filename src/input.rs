use cardstack_core::{KeyAction, TouchPoints};
use glam::Vec2;

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Navigate(i32),
    EnterFullscreen,
    ExitFullscreen,
    Scene(KeyAction),
}

/// Map a `KeyboardEvent.key` to a command. Deck keys apply while browsing,
/// scene keys once a card is fullscreen.
pub fn map_key(key: &str, fullscreen: bool) -> Option<KeyCommand> {
    if !fullscreen {
        return match key {
            "ArrowDown" | "PageDown" | "j" => Some(KeyCommand::Navigate(1)),
            "ArrowUp" | "PageUp" | "k" => Some(KeyCommand::Navigate(-1)),
            "Enter" | " " => Some(KeyCommand::EnterFullscreen),
            _ => None,
        };
    }
    let action = match key {
        "Escape" => return Some(KeyCommand::ExitFullscreen),
        "n" | "N" => KeyAction::ToggleDayNight,
        " " | "p" | "P" => KeyAction::TogglePause,
        "s" | "S" => KeyAction::ToggleSpeed,
        "h" | "H" => KeyAction::ToggleHorn,
        "+" | "=" => KeyAction::AddWagon,
        "-" | "_" => KeyAction::RemoveWagon,
        "r" | "R" => KeyAction::RotateCamera,
        "f" | "F" => KeyAction::FollowTrain,
        "ArrowUp" | "PageUp" => KeyAction::ScrollUp,
        "ArrowDown" | "PageDown" => KeyAction::ScrollDown,
        _ => return None,
    };
    Some(KeyCommand::Scene(action))
}

/// Client (CSS) coordinates to canvas backing pixels.
#[inline]
pub fn css_to_canvas_px(client: Vec2, rect_min: Vec2, rect_size: Vec2, canvas_px: Vec2) -> Vec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    (client - rect_min) / rect_size * canvas_px
}

/// Distance between the first two touches, if there are two.
#[inline]
pub fn touch_distance(points: &TouchPoints) -> Option<f32> {
    match points.as_slice() {
        [a, b, ..] => Some(a.distance(*b)),
        _ => None,
    }
}

/// Press-release pairs that stay within the slop radius count as clicks.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickTracker {
    pressed_at: Option<Vec2>,
    slop: f32,
}

impl ClickTracker {
    pub fn new(slop: f32) -> Self {
        Self {
            pressed_at: None,
            slop,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pressed_at = Some(pos);
    }

    pub fn cancel(&mut self) {
        self.pressed_at = None;
    }

    /// True when the release completes a click.
    pub fn release(&mut self, pos: Vec2) -> bool {
        self.pressed_at
            .take()
            .is_some_and(|start| start.distance(pos) <= self.slop)
    }
}
