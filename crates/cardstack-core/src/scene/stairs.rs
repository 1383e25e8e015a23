use super::{KeyAction, Scene, SceneEvent, SceneInput, Viewport};
use crate::camera::{ray_sphere, Camera, StairCamera};
use crate::constants::*;
use crate::error::{require_range, ConfigError};
use crate::frame::FrameTime;
use crate::path::SpiralStaircase;
use crate::render::{rgb, SceneFrame};
use crate::smoothing::Smoothed;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct StairConfig {
    pub stairs: SpiralStaircase,
    /// Steps carrying a picture frame on the outer wall.
    pub frame_steps: Vec<u32>,
    pub media_slots: usize,
    pub fovy_degrees: f32,
    pub burst_at: f32,
    pub burst_rearm_below: f32,
}

impl Default for StairConfig {
    fn default() -> Self {
        Self {
            stairs: SpiralStaircase::default(),
            frame_steps: STAIR_FRAME_STEPS.to_vec(),
            media_slots: STAIR_FRAME_STEPS.len(),
            fovy_degrees: 70.0,
            burst_at: STAIR_BURST_AT,
            burst_rearm_below: STAIR_BURST_REARM_BELOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PictureFrame {
    pub step: u32,
    pub center: Vec3,
    pub slot: usize,
}

/// First-person climb up the spiral, driven by a smoothed scroll value.
#[derive(Clone, Debug)]
pub struct StairScene {
    stairs: SpiralStaircase,
    rig: StairCamera,
    camera: Camera,
    scroll: Smoothed,
    burst_at: f32,
    burst_rearm_below: f32,
    burst_armed: bool,
    frames: Vec<PictureFrame>,
    viewport: Viewport,
    touch_y: Option<f32>,
    events: Vec<SceneEvent>,
}

impl StairScene {
    pub fn new(config: StairConfig) -> Result<Self, ConfigError> {
        require_range("burst", config.burst_rearm_below, config.burst_at)?;
        let stairs = config.stairs;
        let slots = config.media_slots.max(1);
        let frames = config
            .frame_steps
            .iter()
            .filter(|&&s| s < stairs.step_count())
            .map(|&step| {
                let (a0, a1) = stairs.step_span(step);
                let angle = (a0 + a1) * 0.5;
                let r = stairs.outer_radius() + 0.5;
                PictureFrame {
                    step,
                    center: Vec3::new(
                        angle.cos() * r,
                        step as f32 * stairs.step_height() + stairs.eye_height() + 0.5,
                        angle.sin() * r,
                    ),
                    slot: step as usize % slots,
                }
            })
            .collect();

        let rig = StairCamera::new(&stairs);
        let mut camera = Camera::new(config.fovy_degrees, 0.1, 150.0);
        rig.apply(&stairs, 0.0, &mut camera);
        Ok(Self {
            stairs,
            rig,
            camera,
            scroll: Smoothed::new(0.0, STAIR_SCROLL_SMOOTHING)
                .with_range(0.0, SCROLL_MAX)
                .with_settle(SETTLE_EPSILON),
            burst_at: config.burst_at,
            burst_rearm_below: config.burst_rearm_below,
            burst_armed: true,
            frames,
            viewport: Viewport::default(),
            touch_y: None,
            events: Vec::new(),
        })
    }

    pub fn stairs(&self) -> &SpiralStaircase {
        &self.stairs
    }

    pub fn scroll(&self) -> f32 {
        self.scroll.value()
    }

    pub fn target_scroll(&self) -> f32 {
        self.scroll.target()
    }

    pub fn frames(&self) -> &[PictureFrame] {
        &self.frames
    }

    /// Fractional step the walker is standing on.
    pub fn step_index(&self) -> f32 {
        self.stairs
            .progress_to_index(self.scroll.value() / SCROLL_MAX)
    }

    /// Floor label, one-based: `"1F"` at the bottom.
    pub fn floor_label(&self) -> String {
        format!("{}F", self.step_index().floor() as u32 + 1)
    }

    /// Frame under a canvas pixel, nearest first.
    pub fn pick(&self, px: Vec2) -> Option<&PictureFrame> {
        let (origin, dir) = self.camera.ray_from_ndc(self.viewport.to_ndc(px));
        self.frames
            .iter()
            .filter_map(|f| {
                ray_sphere(origin, dir, f.center, STAIR_FRAME_PICK_RADIUS).map(|t| (t, f))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, f)| f)
    }

    fn scroll_by(&mut self, delta: f32) {
        self.scroll.nudge(delta);
    }
}

impl Scene for StairScene {
    fn update(&mut self, _time: FrameTime) {
        self.scroll.step();
        let index = self.step_index();
        self.rig.apply(&self.stairs, index, &mut self.camera);

        let s = self.scroll.value();
        if s >= self.burst_at && self.burst_armed {
            self.burst_armed = false;
            log::info!("[stairs] top reached at {s:.1}");
            self.events.push(SceneEvent::Burst);
        }
        if s < self.burst_rearm_below {
            self.burst_armed = true;
        }
    }

    fn handle_input(&mut self, input: &SceneInput) {
        match input {
            SceneInput::Wheel { delta_y } => {
                if *delta_y > 0.0 {
                    self.scroll_by(STAIR_WHEEL_STEP);
                } else if *delta_y < 0.0 {
                    self.scroll_by(-STAIR_WHEEL_STEP);
                }
            }
            SceneInput::TouchStart { points } => {
                self.touch_y = points.first().map(|p| p.y);
            }
            SceneInput::TouchMove { points } => {
                if let (Some(prev), Some(p)) = (self.touch_y, points.first()) {
                    self.scroll_by((prev - p.y) * STAIR_TOUCH_SCALE);
                    self.touch_y = Some(p.y);
                }
            }
            SceneInput::TouchEnd => self.touch_y = None,
            SceneInput::Click { pos } => {
                if let Some(frame) = self.pick(*pos) {
                    let slot = frame.slot;
                    log::info!("[stairs] frame on step {} -> media {slot}", frame.step);
                    self.events.push(SceneEvent::OpenMedia { slot });
                }
            }
            SceneInput::Key(KeyAction::ScrollDown) => self.scroll_by(STAIR_WHEEL_STEP),
            SceneInput::Key(KeyAction::ScrollUp) => self.scroll_by(-STAIR_WHEEL_STEP),
            _ => {}
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport.set(width, height);
        self.camera.set_viewport(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self, out: &mut SceneFrame) {
        *out = SceneFrame::new(rgb(0xf5f5f5));
        let st = &self.stairs;
        let tread = rgb(0x2d2d2d);
        for step in 0..st.step_count() {
            let (a0, a1) = st.step_span(step);
            let y = step as f32 * st.step_height() + st.step_thickness();
            for ai in 0..4 {
                let a = a0 + (a1 - a0) * (ai as f32 + 0.5) / 4.0;
                for ri in 0..3 {
                    let r = st.inner_radius()
                        + (st.outer_radius() - st.inner_radius()) * (ri as f32 + 0.5) / 3.0;
                    out.push(Vec3::new(a.cos() * r, y, a.sin() * r), 0.45, tread);
                }
            }
        }

        // central pillar
        let pillar = rgb(0x1a1a1a);
        let top = st.total_height() + 18.0;
        let mut y = -2.0;
        while y < top {
            out.push(Vec3::new(0.0, y, 0.0), st.inner_radius() * 1.2, pillar);
            y += 0.8;
        }

        for f in &self.frames {
            out.push(f.center, 1.6, rgb(0x1a1a1a));
            let inward = Vec3::new(-f.center.x, 0.0, -f.center.z).normalize_or_zero() * 0.06;
            out.push(f.center + inward, 1.2, rgb(0xffffff));
            out.push(f.center + inward * 2.0, 0.3, rgb(0x333333));
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.floor_label())
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
