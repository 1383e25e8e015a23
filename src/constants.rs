// Front-end tuning: DOM ids, colours, input thresholds and horn voicing.
// Kinematics constants live in `cardstack_core::constants`.

use cardstack_core::KeyAction;

// DOM
pub const CANVAS_ID: &str = "deck-canvas";
pub const CARD_ID: &str = "deck-card";
pub const PREVIEW_ID: &str = "deck-preview";
pub const HUD_ID: &str = "hud-label";
pub const BURST_ID: &str = "burst";
pub const MEDIA_OVERLAY_ID: &str = "media-overlay";
pub const CLOSE_BUTTON_ID: &str = "fullscreen-close";
pub const DOT_ID_PREFIX: &str = "deck-dot-";
pub const FULLSCREEN_CLASS: &str = "fullscreen";

/// Railway control buttons and the scene action each one sends.
pub const RAILWAY_BUTTONS: [(&str, KeyAction); 8] = [
    ("btn-night", KeyAction::ToggleDayNight),
    ("btn-pause", KeyAction::TogglePause),
    ("btn-speed", KeyAction::ToggleSpeed),
    ("btn-horn", KeyAction::ToggleHorn),
    ("btn-add-wagon", KeyAction::AddWagon),
    ("btn-remove-wagon", KeyAction::RemoveWagon),
    ("btn-rotate", KeyAction::RotateCamera),
    ("btn-follow", KeyAction::FollowTrain),
];

// Input
pub const CLICK_SLOP_PX: f32 = 6.0; // canvas px a press may travel and still count as a click

// Horn: three sawtooth voices through a low-pass, long-short-short-long.
pub const HORN_CHORD_HZ: [f32; 3] = [277.0, 349.0, 440.0];
pub const HORN_PATTERN: [(f64, f64); 4] = [(0.0, 1.2), (1.4, 0.4), (2.0, 0.4), (2.6, 1.6)];
pub const HORN_DETUNE_START: f32 = 0.98;
pub const HORN_GLIDE_SEC: f64 = 0.08;
pub const HORN_ATTACK_SEC: f64 = 0.03;
pub const HORN_RELEASE_SEC: f64 = 0.15;
pub const HORN_GAIN: f32 = 0.08;
pub const HORN_SUB_GAIN: f32 = 0.04;
pub const HORN_LOWPASS_HZ: f32 = 1200.0;
pub const HORN_LOWPASS_Q: f32 = 1.5;
