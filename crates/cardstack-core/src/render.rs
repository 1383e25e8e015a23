//! Backend-neutral frame description: a clear colour plus instanced markers.

use crate::camera::Camera;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One instanced billboard. Layout matches the GPU instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Marker {
    pub position: [f32; 3],
    pub scale: f32,
    /// Linear RGB plus alpha.
    pub color: [f32; 4],
}

impl Marker {
    pub fn new(position: Vec3, scale: f32, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            scale,
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color[3] = alpha.clamp(0.0, 1.0);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneFrame {
    pub clear_color: [f32; 4],
    pub markers: Vec<Marker>,
}

impl SceneFrame {
    pub fn new(clear: [f32; 3]) -> Self {
        Self {
            clear_color: [clear[0], clear[1], clear[2], 1.0],
            markers: Vec::new(),
        }
    }

    pub fn push(&mut self, position: Vec3, scale: f32, color: [f32; 3]) {
        self.markers.push(Marker::new(position, scale, color));
    }

    /// Evenly spaced markers along a segment, for rails and link lines.
    pub fn push_line(&mut self, a: Vec3, b: Vec3, spacing: f32, scale: f32, color: [f32; 4]) {
        let len = a.distance(b);
        let n = ((len / spacing.max(1e-3)).ceil() as usize).max(1);
        for i in 0..=n {
            let p = a.lerp(b, i as f32 / n as f32);
            self.markers.push(Marker {
                position: p.to_array(),
                scale,
                color,
            });
        }
    }
}

/// Something that can draw a [`SceneFrame`] from a camera.
pub trait RenderBackend {
    fn render(&mut self, frame: &SceneFrame, camera: &Camera) -> anyhow::Result<()>;
}

/// Backend that keeps the last frame; used by host-side tools and tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub frames: usize,
    pub last_markers: usize,
    pub last_eye: Option<Vec3>,
}

impl RenderBackend for RecordingBackend {
    fn render(&mut self, frame: &SceneFrame, camera: &Camera) -> anyhow::Result<()> {
        if !camera.eye.is_finite() {
            anyhow::bail!("camera eye is not finite");
        }
        self.frames += 1;
        self.last_markers = frame.markers.len();
        self.last_eye = Some(camera.eye);
        Ok(())
    }
}

/// `0xRRGGBB` to RGB floats in `[0, 1]`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}
