//! Card scenes: each owns its geometry, camera and agents.

pub mod flip;
pub mod formation;
pub mod railway;
pub mod stairs;

pub use flip::*;
pub use formation::*;
pub use railway::*;
pub use stairs::*;

use crate::camera::Camera;
use crate::frame::FrameTime;
use crate::render::SceneFrame;
use glam::Vec2;
use smallvec::SmallVec;

/// Touch points in canvas pixels.
pub type TouchPoints = SmallVec<[Vec2; 2]>;

/// Keyboard and button actions a scene may react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDayNight,
    TogglePause,
    ToggleSpeed,
    ToggleHorn,
    AddWagon,
    RemoveWagon,
    RotateCamera,
    FollowTrain,
    ScrollUp,
    ScrollDown,
}

/// Input already translated into canvas pixels by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneInput {
    Wheel { delta_y: f32 },
    TouchStart { points: TouchPoints },
    TouchMove { points: TouchPoints },
    TouchEnd,
    PointerDown { pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerUp { pos: Vec2 },
    /// A click that did not turn into a drag.
    Click { pos: Vec2 },
    Key(KeyAction),
}

/// Things a scene asks its host to do.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Horn,
    /// Celebration burst on the stair card.
    Burst,
    OpenMedia { slot: usize },
}

pub trait Scene {
    fn update(&mut self, time: FrameTime);

    fn handle_input(&mut self, input: &SceneInput);

    /// The card holding this scene just expanded to fullscreen.
    fn fullscreen_entered(&mut self) {}

    /// Canvas backing size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn camera(&self) -> &Camera;

    /// Append this frame's markers and set the clear colour.
    fn frame(&self, out: &mut SceneFrame);

    /// HUD text, if the scene shows any.
    fn label(&self) -> Option<String> {
        None
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        Vec::new()
    }
}

/// Viewport size shared by scene implementations for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Viewport {
    pub fn set(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    /// Pixel position to NDC, y up.
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * px.x / self.width - 1.0,
            1.0 - 2.0 * px.y / self.height,
        )
    }
}
