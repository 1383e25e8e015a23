//! Parametric paths: the oval railway and the spiral staircase.

use crate::constants::*;
use crate::error::{require_positive, ConfigError};
use crate::smoothing::{wrap_angle, wrap_unit};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// A point on a path: world position plus heading in the XZ plane.
///
/// Heading is measured from +X toward +Z, so the travel direction is
/// `(cos heading, 0, sin heading)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub position: Vec3,
    pub heading: f32,
}

impl PathPoint {
    #[inline]
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
    }
}

pub trait Path {
    /// Evaluate the path at a normalized progress value.
    fn evaluate(&self, progress: f32) -> PathPoint;

    /// Arc length covered by progress `0..1`.
    fn length(&self) -> f32;
}

/// Closed oval: two straights joined by two semicircles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OvalTrack {
    straight_len: f32,
    turn_radius: f32,
    track_width: f32,
}

/// Which piece of the oval a progress value falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OvalSegment {
    NearStraight,
    RightTurn,
    FarStraight,
    LeftTurn,
}

impl Default for OvalTrack {
    fn default() -> Self {
        Self {
            straight_len: TRACK_STRAIGHT_LEN,
            turn_radius: TRACK_TURN_RADIUS,
            track_width: TRACK_WIDTH,
        }
    }
}

impl OvalTrack {
    pub fn new(straight_len: f32, turn_radius: f32, track_width: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            straight_len: require_positive("straight_len", straight_len)?,
            turn_radius: require_positive("turn_radius", turn_radius)?,
            track_width: require_positive("track_width", track_width)?,
        })
    }

    pub fn straight_len(&self) -> f32 {
        self.straight_len
    }

    pub fn turn_radius(&self) -> f32 {
        self.turn_radius
    }

    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    pub fn perimeter(&self) -> f32 {
        2.0 * self.straight_len + 2.0 * PI * self.turn_radius
    }

    /// Progress fraction of (straight, turn); the layout repeats them twice.
    pub fn segment_fractions(&self) -> (f32, f32) {
        let p = self.perimeter();
        (self.straight_len / p, PI * self.turn_radius / p)
    }

    /// Apex of the right-hand turn, where the station sits.
    pub fn station_progress(&self) -> f32 {
        let (s, c) = self.segment_fractions();
        s + c * 0.5
    }

    /// World position of the station building, just outside the right turn.
    pub fn station_position(&self) -> Vec3 {
        Vec3::new(self.straight_len / 2.0 + self.turn_radius + 5.0, 0.0, 0.0)
    }

    pub fn segment_at(&self, progress: f32) -> OvalSegment {
        let t = wrap_unit(progress);
        let (s, c) = self.segment_fractions();
        if t < s {
            OvalSegment::NearStraight
        } else if t < s + c {
            OvalSegment::RightTurn
        } else if t < 2.0 * s + c {
            OvalSegment::FarStraight
        } else {
            OvalSegment::LeftTurn
        }
    }

    /// Distance from a ground point to the track centreline.
    pub fn distance_to_centerline(&self, p: Vec2) -> f32 {
        let half = self.straight_len / 2.0;
        let r = self.turn_radius;
        if p.x.abs() <= half {
            // beside a straight: nearest of the two rails' centre lines
            (p.y + r).abs().min((p.y - r).abs())
        } else {
            let cx = if p.x > 0.0 { half } else { -half };
            ((p - Vec2::new(cx, 0.0)).length() - r).abs()
        }
    }

    /// Whether a ground point lies within `margin` of the centreline.
    pub fn is_near(&self, p: Vec2, margin: f32) -> bool {
        self.distance_to_centerline(p) < margin
    }
}

impl Path for OvalTrack {
    fn evaluate(&self, progress: f32) -> PathPoint {
        let t = wrap_unit(progress);
        let len = self.straight_len;
        let r = self.turn_radius;
        let half = len / 2.0;
        let (s, c) = self.segment_fractions();

        let (x, z, heading) = if t < s {
            let f = t / s;
            (-half + f * len, -r, 0.0)
        } else if t < s + c {
            let f = (t - s) / c;
            let a = -FRAC_PI_2 + f * PI;
            (half + r * a.cos(), r * a.sin(), a + FRAC_PI_2)
        } else if t < 2.0 * s + c {
            let f = (t - s - c) / s;
            (half - f * len, r, PI)
        } else {
            let f = ((t - 2.0 * s - c) / (1.0 - 2.0 * s - c)).clamp(0.0, 1.0);
            let a = FRAC_PI_2 + f * PI;
            (-half + r * a.cos(), r * a.sin(), a + FRAC_PI_2)
        };

        PathPoint {
            position: Vec3::new(x, 0.0, z),
            heading: wrap_angle(heading),
        }
    }

    fn length(&self) -> f32 {
        self.perimeter()
    }
}

/// Helical staircase of annular-sector steps around a central pillar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralStaircase {
    step_count: u32,
    angle_per_step: f32,
    inner_radius: f32,
    outer_radius: f32,
    step_height: f32,
    step_thickness: f32,
    eye_height: f32,
}

impl Default for SpiralStaircase {
    fn default() -> Self {
        Self {
            step_count: STAIR_COUNT,
            angle_per_step: STAIR_ANGLE_DEG.to_radians(),
            inner_radius: STAIR_INNER_RADIUS,
            outer_radius: STAIR_OUTER_RADIUS,
            step_height: STAIR_HEIGHT,
            step_thickness: STAIR_THICKNESS,
            eye_height: STAIR_EYE_HEIGHT,
        }
    }
}

impl SpiralStaircase {
    /// `angle_per_step` is in radians; positive values climb counter-clockwise
    /// seen from above.
    pub fn new(
        step_count: u32,
        angle_per_step: f32,
        inner_radius: f32,
        outer_radius: f32,
        step_height: f32,
    ) -> Result<Self, ConfigError> {
        if step_count == 0 {
            return Err(ConfigError::NonPositive {
                name: "step_count",
                value: 0.0,
            });
        }
        if !angle_per_step.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "angle_per_step",
            });
        }
        if angle_per_step == 0.0 {
            return Err(ConfigError::NonPositive {
                name: "angle_per_step",
                value: 0.0,
            });
        }
        let inner_radius = require_positive("inner_radius", inner_radius)?;
        let outer_radius = require_positive("outer_radius", outer_radius)?;
        if inner_radius >= outer_radius {
            return Err(ConfigError::InvertedRange {
                name: "stair radius",
                min: inner_radius,
                max: outer_radius,
            });
        }
        Ok(Self {
            step_count,
            angle_per_step,
            inner_radius,
            outer_radius,
            step_height: require_positive("step_height", step_height)?,
            step_thickness: STAIR_THICKNESS,
            eye_height: STAIR_EYE_HEIGHT,
        })
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn angle_per_step(&self) -> f32 {
        self.angle_per_step
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn step_height(&self) -> f32 {
        self.step_height
    }

    pub fn step_thickness(&self) -> f32 {
        self.step_thickness
    }

    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Radius midway across the tread.
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    pub fn total_height(&self) -> f32 {
        self.step_count as f32 * self.step_height
    }

    /// Point at a (fractional) step index on the mid radius.
    pub fn evaluate_step(&self, index: f32) -> PathPoint {
        self.evaluate_step_at_radius(index, self.mid_radius())
    }

    pub fn evaluate_step_at_radius(&self, index: f32, radius: f32) -> PathPoint {
        let angle = index * self.angle_per_step;
        let turn = if self.angle_per_step >= 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        };
        PathPoint {
            position: Vec3::new(
                radius * angle.cos(),
                index * self.step_height,
                radius * angle.sin(),
            ),
            heading: wrap_angle(angle + turn),
        }
    }

    /// Eye height of someone standing on step `index`.
    pub fn tread_height(&self, index: f32) -> f32 {
        index * self.step_height + self.step_thickness + self.eye_height
    }

    /// Start and end angle of a whole step's sector.
    pub fn step_span(&self, step: u32) -> (f32, f32) {
        let a0 = step as f32 * self.angle_per_step;
        (a0, a0 + self.angle_per_step)
    }

    pub fn progress_to_index(&self, progress: f32) -> f32 {
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        p * self.step_count as f32
    }
}

impl Path for SpiralStaircase {
    fn evaluate(&self, progress: f32) -> PathPoint {
        self.evaluate_step(self.progress_to_index(progress))
    }

    fn length(&self) -> f32 {
        let run = self.mid_radius() * self.angle_per_step.abs();
        self.step_count as f32 * (run * run + self.step_height * self.step_height).sqrt()
    }
}
