use super::{KeyAction, Scene, SceneInput};
use crate::camera::Camera;
use crate::constants::*;
use crate::error::{require_positive, ConfigError};
use crate::formation::{formation_camera_eye, FormationBlend, FormationField};
use crate::frame::FrameTime;
use crate::render::{rgb, Marker, SceneFrame};
use crate::smoothing::Smoothed;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct FormationConfig {
    pub node_count: usize,
    pub fovy_degrees: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            node_count: FORMATION_NODE_COUNT,
            fovy_degrees: 55.0,
        }
    }
}

/// Scroll-driven morph between point formations under an auto-orbiting camera.
#[derive(Clone, Debug)]
pub struct FormationScene {
    field: FormationField,
    camera: Camera,
    scroll: Smoothed,
    blend: FormationBlend,
    elapsed: f32,
    wheel_ready_at: f32,
    touch_y: Option<f32>,
}

impl FormationScene {
    pub fn new(config: FormationConfig) -> Result<Self, ConfigError> {
        require_positive("fovy_degrees", config.fovy_degrees)?;
        let field = FormationField::new(config.node_count)?;
        let mut camera = Camera::new(config.fovy_degrees, 0.1, 200.0);
        camera.eye = formation_camera_eye(0.0, 0.0);
        Ok(Self {
            field,
            camera,
            scroll: Smoothed::new(0.0, FORMATION_SCROLL_SMOOTHING)
                .with_range(0.0, SCROLL_MAX)
                .with_settle(SETTLE_EPSILON),
            blend: FormationBlend::at(0.0),
            elapsed: 0.0,
            wheel_ready_at: 0.0,
            touch_y: None,
        })
    }

    pub fn field(&self) -> &FormationField {
        &self.field
    }

    pub fn scroll(&self) -> f32 {
        self.scroll.value()
    }

    pub fn target_scroll(&self) -> f32 {
        self.scroll.target()
    }

    pub fn progress(&self) -> f32 {
        self.scroll.value() / SCROLL_MAX
    }

    pub fn blend(&self) -> FormationBlend {
        self.blend
    }

    fn wheel_step(&mut self, direction: f32) {
        if self.elapsed < self.wheel_ready_at {
            return;
        }
        self.wheel_ready_at = self.elapsed + FORMATION_WHEEL_COOLDOWN_SEC;
        self.scroll.nudge(direction * FORMATION_WHEEL_STEP);
    }
}

impl Scene for FormationScene {
    fn update(&mut self, time: FrameTime) {
        self.elapsed = time.elapsed;
        self.scroll.step();
        let progress = self.progress();
        self.blend = self.field.step(time.elapsed, progress);
        self.camera.eye = formation_camera_eye(time.elapsed, progress);
        self.camera.target = Vec3::ZERO;
    }

    fn handle_input(&mut self, input: &SceneInput) {
        match input {
            SceneInput::Wheel { delta_y } if *delta_y != 0.0 => {
                self.wheel_step(delta_y.signum());
            }
            SceneInput::TouchStart { points } => self.touch_y = points.first().map(|p| p.y),
            SceneInput::TouchMove { points } => {
                if let (Some(prev), Some(p)) = (self.touch_y, points.first()) {
                    self.scroll.nudge((prev - p.y) * FORMATION_TOUCH_SCALE);
                    self.touch_y = Some(p.y);
                }
            }
            SceneInput::TouchEnd => self.touch_y = None,
            SceneInput::Key(KeyAction::ScrollDown) => self.wheel_step(1.0),
            SceneInput::Key(KeyAction::ScrollUp) => self.wheel_step(-1.0),
            _ => {}
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self, out: &mut SceneFrame) {
        *out = SceneFrame::new(rgb(0x08080f));
        let base = rgb(0xd8dcf0);
        let accent = rgb(0x6e8efb);
        for node in self.field.nodes() {
            let (color, size) = if node.accent {
                (accent, 0.55)
            } else {
                (base, 0.35)
            };
            out.push(node.position, size * node.scale, color);
        }
        let [r, g, b] = accent;
        for [a, z] in self.field.links() {
            out.push_line(*a, *z, 0.6, 0.08, [r, g, b, 0.35]);
        }
        // faint backdrop ring
        for k in 0..48 {
            let a = k as f32 / 48.0 * std::f32::consts::TAU;
            out.markers
                .push(Marker::new(Vec3::new(a.cos() * 30.0, -12.0, a.sin() * 30.0), 0.4, base).with_alpha(0.2));
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.blend.nearest().label().to_string())
    }
}
