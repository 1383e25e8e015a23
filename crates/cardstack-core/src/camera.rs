//! Camera state and the rigs that drive it.
//!
//! Nothing here touches a platform API; front-ends build view/projection
//! matrices from [`Camera`] and feed pointer deltas into the rigs.

use crate::constants::*;
use crate::path::SpiralStaircase;
use crate::smoothing::Smoothed;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, PI};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(fovy_degrees: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio; zero-sized viewports keep the previous one.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World point to normalized device coordinates. `None` behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_proj() * world.extend(1.0);
        (clip.w > 1e-6).then(|| clip.truncate() / clip.w)
    }

    /// World-space picking ray through an NDC point (`x`, `y` in `[-1, 1]`, y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let dir = (far - self.eye).normalize_or_zero();
        (self.eye, dir)
    }

    /// Picking ray from a pixel position on a `width` x `height` viewport.
    pub fn ray_from_pixel(&self, px: Vec2, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc = Vec2::new(
            2.0 * px.x / width.max(1.0) - 1.0,
            1.0 - 2.0 * px.y / height.max(1.0),
        );
        self.ray_from_ndc(ndc)
    }
}

/// Where a rig points the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookAt {
    Origin,
    /// A tracked world point, refreshed by the scene every frame.
    Point(Vec3),
    /// `lead` steps further along the rig's path.
    AheadOnPath { lead: f32 },
}

impl LookAt {
    /// Resolve to a world point; `ahead` evaluates the rig's path `lead` steps on.
    pub fn resolve(&self, ahead: impl FnOnce(f32) -> Vec3) -> Vec3 {
        match *self {
            LookAt::Origin => Vec3::ZERO,
            LookAt::Point(p) => p,
            LookAt::AheadOnPath { lead } => ahead(lead),
        }
    }
}

/// Spherical orbit around a look-at point with smoothed, clamped angles.
#[derive(Clone, Debug)]
pub struct OrbitRig {
    theta: Smoothed,
    phi: Smoothed,
    radius: Smoothed,
    look_at: LookAt,
    rotate_index: u32,
    auto_orbit: Option<f32>,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new(ORBIT_DEFAULT_THETA, ORBIT_DEFAULT_PHI, ORBIT_DEFAULT_RADIUS)
    }
}

impl OrbitRig {
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self {
            theta: Smoothed::new(theta, ORBIT_THETA_SMOOTHING),
            phi: Smoothed::new(phi, ORBIT_PHI_SMOOTHING).with_range(ORBIT_PHI_MIN, ORBIT_PHI_MAX),
            radius: Smoothed::new(radius, ORBIT_RADIUS_SMOOTHING)
                .with_range(ORBIT_RADIUS_MIN, ORBIT_RADIUS_MAX),
            look_at: LookAt::Origin,
            rotate_index: 0,
            auto_orbit: None,
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta.value()
    }

    pub fn phi(&self) -> f32 {
        self.phi.value()
    }

    pub fn radius(&self) -> f32 {
        self.radius.value()
    }

    pub fn target_theta(&self) -> f32 {
        self.theta.target()
    }

    pub fn target_phi(&self) -> f32 {
        self.phi.target()
    }

    pub fn target_radius(&self) -> f32 {
        self.radius.target()
    }

    pub fn look_at(&self) -> LookAt {
        self.look_at
    }

    pub fn set_look_at(&mut self, look_at: LookAt) {
        self.look_at = look_at;
    }

    /// Idle auto-orbit speed in radians per second; `None` disables it.
    pub fn set_auto_orbit(&mut self, rate: Option<f32>) {
        self.auto_orbit = rate.filter(|r| r.is_finite());
    }

    /// Mouse drag in CSS pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.theta.nudge(-dx * DRAG_THETA_PER_PX);
        self.phi.nudge(dy * DRAG_PHI_PER_PX);
    }

    /// One-finger touch drag in CSS pixels.
    pub fn touch_drag(&mut self, dx: f32, dy: f32) {
        self.theta.nudge(-dx * TOUCH_THETA_PER_PX);
        self.phi.nudge(dy * TOUCH_PHI_PER_PX);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.radius.nudge(delta_y * WHEEL_ZOOM_PER_DELTA);
    }

    /// Change of the two-finger distance since the last move; spreading zooms in.
    pub fn pinch(&mut self, delta_distance: f32) {
        self.radius.nudge(-delta_distance * PINCH_ZOOM_PER_PX);
    }

    /// Advance the rotate button one preset (60° apart, first one at -π/2).
    pub fn rotate_step(&mut self) -> u32 {
        self.rotate_index = (self.rotate_index + 1) % ORBIT_ROTATE_STEPS;
        let step = 2.0 * PI / ORBIT_ROTATE_STEPS as f32;
        self.theta
            .set_target(-FRAC_PI_2 + self.rotate_index as f32 * step);
        self.rotate_index
    }

    pub fn step(&mut self, dt: f32) {
        if let Some(rate) = self.auto_orbit {
            self.theta.nudge(rate * dt);
        }
        self.theta.step();
        self.phi.step();
        self.radius.step();
    }

    /// Offset of the eye from the look-at point.
    pub fn offset(&self) -> Vec3 {
        orbit_offset(self.theta(), self.phi(), self.radius())
    }

    pub fn apply(&self, camera: &mut Camera) {
        let target = self.look_at.resolve(|_| Vec3::ZERO);
        camera.target = target;
        camera.eye = target + self.offset();
        camera.up = Vec3::Y;
    }
}

/// `y = r cos φ`, horizontal distance `r sin φ`, azimuth `θ` measured from +Z.
#[inline]
pub fn orbit_offset(theta: f32, phi: f32, radius: f32) -> Vec3 {
    let horizontal = radius * phi.sin();
    Vec3::new(
        horizontal * theta.sin(),
        radius * phi.cos(),
        horizontal * theta.cos(),
    )
}

/// First-person walker on the spiral staircase.
#[derive(Clone, Debug)]
pub struct StairCamera {
    pub radius: f32,
    pub look_at: LookAt,
}

impl StairCamera {
    pub fn new(stairs: &SpiralStaircase) -> Self {
        Self {
            radius: stairs.outer_radius() - STAIR_CAMERA_INSET,
            look_at: LookAt::AheadOnPath {
                lead: STAIR_LOOK_AHEAD_STEPS,
            },
        }
    }

    /// Eye position standing on (fractional) step `index`.
    pub fn eye(&self, stairs: &SpiralStaircase, index: f32) -> Vec3 {
        let p = stairs.evaluate_step_at_radius(index, self.radius).position;
        Vec3::new(p.x, stairs.tread_height(index), p.z)
    }

    pub fn apply(&self, stairs: &SpiralStaircase, index: f32, camera: &mut Camera) {
        camera.eye = self.eye(stairs, index);
        camera.target = self.look_at.resolve(|lead| self.eye(stairs, index + lead));
        camera.up = Vec3::Y;
    }
}

/// Distance along a normalized ray to the first hit on a sphere.
///
/// Rays starting inside the sphere, or spheres behind the origin, miss.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
