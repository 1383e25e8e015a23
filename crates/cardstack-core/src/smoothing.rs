//! Per-frame exponential smoothing.
//!
//! Every animated scalar in the deck closes a fixed fraction of the gap to its
//! target once per frame. There is no velocity state; the curve only looks
//! damped because the remaining gap shrinks geometrically.

use std::f32::consts::{PI, TAU};

/// One smoothing step: `current + (target - current) * factor`.
#[inline]
pub fn smooth(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Wrap a periodic parameter into `[0, 1)`, negative values wrapping to the top.
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    let w = x.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0 in f32
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Signed turn from `from` to `to` along the shorter arc, in `(-π, π]`.
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let mut d = (to - from).rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}

/// Smooth an angle toward `target` without spinning the long way round.
#[inline]
pub fn smooth_angle(current: f32, target: f32, factor: f32) -> f32 {
    current + shortest_angle_delta(current, target) * factor
}

/// Hermite ease on `[0, 1]`; inputs outside are clamped.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let t = x.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A smoothed scalar: a `current` value chasing a clamped `target`.
///
/// Input handlers only call [`Smoothed::set_target`] or [`Smoothed::nudge`];
/// the frame loop is the sole caller of [`Smoothed::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed {
    current: f32,
    target: f32,
    factor: f32,
    min: f32,
    max: f32,
    settle: Option<f32>,
}

impl Smoothed {
    /// Unbounded value starting at rest. `factor` is clamped into `[0, 1]`.
    pub fn new(value: f32, factor: f32) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Self {
            current: value,
            target: value,
            factor: if factor.is_finite() {
                factor.clamp(0.0, 1.0)
            } else {
                0.0
            },
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
            settle: None,
        }
    }

    /// Restrict both current and target to `[min, max]`.
    ///
    /// An inverted or non-finite range is ignored; scene configs validate
    /// their ranges before building these.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        if min.is_nan() || max.is_nan() || min > max {
            log::warn!("[smooth] ignoring invalid range {min}..{max}");
            return self;
        }
        self.min = min;
        self.max = max;
        self.current = self.current.clamp(min, max);
        self.target = self.target.clamp(min, max);
        self
    }

    /// Snap onto the target once the gap drops below `epsilon`.
    pub fn with_settle(mut self, epsilon: f32) -> Self {
        self.settle = Some(epsilon.abs());
        self
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target.clamp(self.min, self.max);
        }
    }

    /// Add an input delta to the target, clamped to the range.
    pub fn nudge(&mut self, delta: f32) {
        self.set_target(self.target + delta);
    }

    /// Jump both current and target to `value`.
    pub fn snap_to(&mut self, value: f32) {
        if value.is_finite() {
            let v = value.clamp(self.min, self.max);
            self.current = v;
            self.target = v;
        }
    }

    /// Advance one frame and return the new current value.
    pub fn step(&mut self) -> f32 {
        let gap = self.target - self.current;
        match self.settle {
            Some(eps) if gap.abs() <= eps => self.current = self.target,
            _ => self.current = smooth(self.current, self.target, self.factor),
        }
        self.current = self.current.clamp(self.min, self.max);
        self.current
    }

    pub fn is_settled(&self) -> bool {
        let eps = self.settle.unwrap_or(0.0);
        (self.target - self.current).abs() <= eps
    }
}
