use crate::constants::*;
use crate::obstacles::Field;
use crate::smoothing::{smooth_angle, wrap_angle};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SheepState {
    Idle { next_move_at: f32 },
    Walking { target: Vec2, next_move_at: f32 },
    Eating { until: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Sheep {
    pub position: Vec2,
    pub heading: f32,
    /// World units per frame.
    pub speed: f32,
    pub state: SheepState,
    /// Leg pitch for the front-left / back-right pair; the other pair mirrors it.
    pub leg_swing: f32,
    /// Vertical body offset while grazing.
    pub head_bob: f32,
}

impl Sheep {
    pub fn new(position: Vec2, heading: f32, speed: f32, next_move_at: f32) -> Self {
        Self {
            position,
            heading: wrap_angle(heading),
            speed,
            state: SheepState::Idle { next_move_at },
            leg_swing: 0.0,
            head_bob: 0.0,
        }
    }
}

/// The wandering flock. Sheep avoid the field's obstacles and each other.
#[derive(Clone, Debug, Default)]
pub struct Flock {
    sheep: Vec<Sheep>,
}

impl Flock {
    pub fn new(sheep: Vec<Sheep>) -> Self {
        Self { sheep }
    }

    /// Rejection-sample up to `count` sheep into free spots of the field.
    ///
    /// A sheep whose attempts all land on blocked ground is skipped, so the
    /// flock can come out smaller than `count`.
    pub fn spawn<R: Rng + ?Sized>(count: usize, field: &Field, rng: &mut R) -> Self {
        let mut flock = Self::default();
        for _ in 0..count {
            let spot = (0..SHEEP_SPAWN_ATTEMPTS).find_map(|_| {
                let p = Vec2::new(
                    (rng.gen::<f32>() - 0.5) * 2.0 * SHEEP_SPAWN_HALF_EXTENT,
                    (rng.gen::<f32>() - 0.5) * 2.0 * SHEEP_SPAWN_HALF_EXTENT,
                );
                (!flock.is_blocked(p, None, field)).then_some(p)
            });
            let Some(position) = spot else {
                log::debug!("[sheep] no free spot after {SHEEP_SPAWN_ATTEMPTS} attempts");
                continue;
            };
            flock.sheep.push(Sheep::new(
                position,
                rng.gen::<f32>() * TAU,
                SHEEP_SPEED_MIN + rng.gen::<f32>() * SHEEP_SPEED_SPAN,
                rng.gen::<f32>() * 5.0,
            ));
        }
        flock
    }

    pub fn sheep(&self) -> &[Sheep] {
        &self.sheep
    }

    pub fn len(&self) -> usize {
        self.sheep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheep.is_empty()
    }

    /// Blocked for sheep `skip` (or a newcomer when `None`).
    pub fn is_blocked(&self, p: Vec2, skip: Option<usize>, field: &Field) -> bool {
        if field.is_blocked(p) {
            return true;
        }
        let min_sq = SHEEP_MIN_SEPARATION * SHEEP_MIN_SEPARATION;
        self.sheep
            .iter()
            .enumerate()
            .any(|(j, other)| Some(j) != skip && other.position.distance_squared(p) < min_sq)
    }

    /// Advance every sheep one frame at elapsed time `t` (seconds).
    pub fn step<R: Rng + ?Sized>(&mut self, t: f32, field: &Field, rng: &mut R) {
        for i in 0..self.sheep.len() {
            let mut s = self.sheep[i];
            self.step_one(i, &mut s, t, field, rng);
            self.sheep[i] = s;
        }
    }

    fn step_one<R: Rng + ?Sized>(
        &self,
        idx: usize,
        s: &mut Sheep,
        t: f32,
        field: &Field,
        rng: &mut R,
    ) {
        let (mut target, mut next_move_at) = match s.state {
            SheepState::Eating { until } => {
                s.leg_swing = 0.0;
                s.head_bob = (t * 4.0).sin() * 0.03;
                if t > until {
                    s.state = SheepState::Idle {
                        next_move_at: t + SHEEP_BLOCKED_RETRY_SEC,
                    };
                }
                return;
            }
            SheepState::Idle { next_move_at } => (s.position, next_move_at),
            SheepState::Walking {
                target,
                next_move_at,
            } => (target, next_move_at),
        };
        s.head_bob = 0.0;

        if t > next_move_at {
            target = self.pick_target(idx, s, field, rng);
            next_move_at = t + 4.0 + rng.gen::<f32>() * 6.0;
            if rng.gen::<f32>() < SHEEP_EAT_PROBABILITY {
                s.state = SheepState::Eating {
                    until: t + 2.0 + rng.gen::<f32>() * 3.0,
                };
                return;
            }
        }

        let to = target - s.position;
        if to.length() > SHEEP_ARRIVE_DIST {
            s.heading = wrap_angle(smooth_angle(
                s.heading,
                to.y.atan2(to.x),
                SHEEP_TURN_SMOOTHING,
            ));
            let next = s.position + Vec2::new(s.heading.cos(), s.heading.sin()) * s.speed;
            if self.is_blocked(next, Some(idx), field) {
                s.state = SheepState::Idle {
                    next_move_at: t + SHEEP_BLOCKED_RETRY_SEC,
                };
                s.leg_swing *= SHEEP_LEG_DECAY;
            } else {
                s.position = next;
                s.state = SheepState::Walking {
                    target,
                    next_move_at,
                };
                s.leg_swing = (t * 6.0).sin() * SHEEP_LEG_SWING;
            }
        } else {
            s.state = SheepState::Idle { next_move_at };
            s.leg_swing *= SHEEP_LEG_DECAY;
        }
    }

    /// Forward-cone target search with a bounded retry, then a forced reversal.
    fn pick_target<R: Rng + ?Sized>(
        &self,
        idx: usize,
        s: &mut Sheep,
        field: &Field,
        rng: &mut R,
    ) -> Vec2 {
        for _ in 0..SHEEP_TARGET_ATTEMPTS {
            let da = (rng.gen::<f32>() - 0.5) * 2.0 * SHEEP_CONE_HALF_ANGLE;
            let dist = SHEEP_TARGET_MIN_DIST + rng.gen::<f32>() * SHEEP_TARGET_DIST_SPAN;
            let a = s.heading + da;
            let candidate = (s.position + Vec2::new(a.cos(), a.sin()) * dist)
                .clamp(Vec2::splat(-SHEEP_TARGET_CLAMP), Vec2::splat(SHEEP_TARGET_CLAMP));
            if !self.is_blocked(candidate, Some(idx), field) {
                return candidate;
            }
        }
        s.heading = wrap_angle(s.heading + PI);
        s.position + Vec2::new(s.heading.cos(), s.heading.sin()) * SHEEP_REVERSE_DIST
    }
}
