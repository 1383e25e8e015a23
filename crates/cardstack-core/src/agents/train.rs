use crate::constants::*;
use crate::path::{OvalTrack, Path, PathPoint};
use crate::smoothing::wrap_unit;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainEvent {
    /// The locomotive crossed the station progress this frame.
    PassedStation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainSpeed {
    Slow,
    Fast,
}

impl TrainSpeed {
    pub fn per_frame(self) -> f32 {
        match self {
            TrainSpeed::Slow => TRAIN_SPEED_SLOW,
            TrainSpeed::Fast => TRAIN_SPEED_FAST,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TrainSpeed::Slow => TrainSpeed::Fast,
            TrainSpeed::Fast => TrainSpeed::Slow,
        }
    }
}

/// One car of the convoy, placed on the track.
#[derive(Clone, Copy, Debug)]
pub struct Car {
    pub progress: f32,
    pub point: PathPoint,
    pub color: [f32; 3],
    pub is_locomotive: bool,
}

pub type Cars = SmallVec<[Car; 9]>;

/// Locomotive plus wagons following at a fixed arc-length spacing.
#[derive(Clone, Debug)]
pub struct Train {
    progress: f32,
    speed: TrainSpeed,
    custom_speed: Option<f32>,
    running: bool,
    wagons: SmallVec<[[f32; 3]; TRAIN_MAX_WAGONS]>,
    next_color: usize,
    wheel_angle: f32,
}

impl Default for Train {
    fn default() -> Self {
        Self::new(TRAIN_START_WAGONS)
    }
}

impl Train {
    pub fn new(wagons: usize) -> Self {
        let mut train = Self {
            progress: 0.0,
            speed: TrainSpeed::Slow,
            custom_speed: None,
            running: true,
            wagons: SmallVec::new(),
            next_color: 0,
            wheel_angle: 0.0,
        };
        for _ in 0..wagons.min(TRAIN_MAX_WAGONS) {
            train.add_wagon();
        }
        train
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        if progress.is_finite() {
            self.progress = wrap_unit(progress);
        }
    }

    pub fn speed(&self) -> TrainSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: TrainSpeed) {
        self.speed = speed;
        self.custom_speed = None;
    }

    pub fn toggle_speed(&mut self) -> TrainSpeed {
        self.set_speed(self.speed.toggled());
        self.speed
    }

    /// Override the per-frame progress increment. Non-finite values are ignored.
    pub fn set_speed_per_frame(&mut self, per_frame: f32) {
        if per_frame.is_finite() {
            self.custom_speed = Some(per_frame);
        }
    }

    pub fn speed_per_frame(&self) -> f32 {
        self.custom_speed.unwrap_or_else(|| self.speed.per_frame())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn wagon_count(&self) -> usize {
        self.wagons.len()
    }

    pub fn car_count(&self) -> usize {
        self.wagons.len() + 1
    }

    pub fn wheel_angle(&self) -> f32 {
        self.wheel_angle
    }

    /// Append a wagon, colours cycling through the palette. False when full.
    pub fn add_wagon(&mut self) -> bool {
        if self.wagons.len() >= TRAIN_MAX_WAGONS {
            return false;
        }
        let color = WAGON_COLORS[self.next_color % WAGON_COLORS.len()];
        self.next_color += 1;
        self.wagons.push(color);
        true
    }

    /// Drop the last wagon. False when only the locomotive is left.
    pub fn remove_wagon(&mut self) -> bool {
        if self.wagons.pop().is_some() {
            self.next_color = self.next_color.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Advance one frame, reporting a station crossing into `events`.
    pub fn step(&mut self, track: &OvalTrack, events: &mut Vec<TrainEvent>) {
        if !self.running {
            return;
        }
        let prev = self.progress;
        self.progress = wrap_unit(prev + self.speed_per_frame());
        if crossed(prev, self.progress, track.station_progress()) {
            events.push(TrainEvent::PassedStation);
        }
        self.wheel_angle += TRAIN_WHEEL_SPIN_PER_FRAME;
    }

    /// Car placements, locomotive first.
    pub fn cars(&self, track: &OvalTrack) -> Cars {
        let spacing = TRAIN_CAR_SPACING / track.perimeter();
        let mut cars = Cars::new();
        let colors = std::iter::once(LOCOMOTIVE_COLOR).chain(self.wagons.iter().copied());
        for (i, color) in colors.enumerate() {
            let progress = wrap_unit(self.progress - i as f32 * spacing);
            cars.push(Car {
                progress,
                point: track.evaluate(progress),
                color,
                is_locomotive: i == 0,
            });
        }
        cars
    }

    /// World position of the locomotive chimney, where smoke is emitted.
    pub fn chimney(&self, track: &OvalTrack) -> Vec3 {
        let p = track.evaluate(self.progress);
        // chimney sits 1.8 units behind the nose, 3.5 up
        p.position - p.direction() * 1.8 + Vec3::Y * 3.5
    }
}

/// Forward crossing of `mark` between two wrapped progress values.
fn crossed(prev: f32, next: f32, mark: f32) -> bool {
    if next >= prev {
        prev < mark && next >= mark
    } else {
        prev < mark || next >= mark
    }
}

/// Horn rate limiter: one request per cooldown window, and only when enabled.
#[derive(Clone, Copy, Debug)]
pub struct HornGate {
    enabled: bool,
    cooldown: f32,
    ready_at: f32,
}

impl Default for HornGate {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown: HORN_COOLDOWN_SEC,
            ready_at: 0.0,
        }
    }
}

impl HornGate {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// True when a horn should sound now; arms the cooldown.
    pub fn request(&mut self, now: f32) -> bool {
        if !self.enabled || now < self.ready_at {
            return false;
        }
        self.ready_at = now + self.cooldown;
        true
    }
}
