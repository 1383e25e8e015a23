use super::{KeyAction, Scene, SceneEvent, SceneInput, Viewport};
use crate::agents::*;
use crate::camera::{Camera, LookAt, OrbitRig};
use crate::constants::*;
use crate::error::{require_positive, ConfigError};
use crate::frame::FrameTime;
use crate::obstacles::{Field, ObstacleList, POND_POSITION, WINDMILL_POSITION};
use crate::path::{OvalTrack, Path};
use crate::render::{rgb, Marker, SceneFrame};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

const SUN_POSITION: Vec3 = Vec3::new(60.0, 28.0, -40.0);
const MOON_POSITION: Vec3 = Vec3::new(-50.0, 35.0, -30.0);
const CELESTIAL_EYE_RADIUS: f32 = 0.9;
const WINDMILL_SPIN_PER_FRAME: f32 = 0.02;

#[derive(Clone, Debug)]
pub struct RailwayConfig {
    pub track: OvalTrack,
    pub wagons: usize,
    pub sheep: usize,
    pub clouds: usize,
    pub fovy_degrees: f32,
    pub seed: u64,
}

impl Default for RailwayConfig {
    fn default() -> Self {
        Self {
            track: OvalTrack::default(),
            wagons: TRAIN_START_WAGONS,
            sheep: SHEEP_COUNT,
            clouds: CLOUD_COUNT,
            fovy_degrees: 45.0,
            seed: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    None,
    Drag(Vec2),
    Pinch(f32),
}

/// Pupil offset inside a billboarded eye, following the pointer.
///
/// Both positions are in NDC. The pointer distance is capped at 2 and mapped
/// onto at most `0.35 * eye_radius` of travel.
pub fn pupil_offset(pointer_ndc: Vec2, body_ndc: Vec2, eye_radius: f32) -> Vec2 {
    let max_d = 2.0;
    let d = (pointer_ndc - body_ndc).clamp_length_max(max_d);
    d / max_d * (eye_radius * 0.35)
}

/// The toy-train world: oval railway, wandering sheep, sky traffic.
#[derive(Clone, Debug)]
pub struct RailwayScene {
    track: OvalTrack,
    field: Field,
    train: Train,
    horn: HornGate,
    flock: Flock,
    sky: Sky,
    smoke: Smoke,
    clouds: Clouds,
    rig: OrbitRig,
    camera: Camera,
    night: bool,
    follow_train: bool,
    windmill: f32,
    elapsed: f32,
    pointer_ndc: Vec2,
    viewport: Viewport,
    gesture: Gesture,
    rng: StdRng,
    train_events: Vec<TrainEvent>,
    events: Vec<SceneEvent>,
}

impl RailwayScene {
    pub fn new(config: RailwayConfig) -> Result<Self, ConfigError> {
        require_positive("fovy_degrees", config.fovy_degrees)?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let track = config.track;
        let field = Field::new(track, ObstacleList::farm(&track));
        let flock = Flock::spawn(config.sheep, &field, &mut rng);
        log::info!(
            "[railway] {} obstacles, {} of {} sheep placed",
            field.obstacles.len(),
            flock.len(),
            config.sheep
        );
        let sky = Sky::new(&mut rng);
        let clouds = Clouds::new(config.clouds, &mut rng);
        let rig = OrbitRig::default();
        let mut camera = Camera::new(config.fovy_degrees, 0.5, 350.0);
        rig.apply(&mut camera);
        Ok(Self {
            track,
            field,
            train: Train::new(config.wagons),
            horn: HornGate::default(),
            flock,
            sky,
            smoke: Smoke::default(),
            clouds,
            rig,
            camera,
            night: false,
            follow_train: false,
            windmill: 0.0,
            elapsed: 0.0,
            pointer_ndc: Vec2::ZERO,
            viewport: Viewport::default(),
            gesture: Gesture::None,
            rng,
            train_events: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn track(&self) -> &OvalTrack {
        &self.track
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn train(&self) -> &Train {
        &self.train
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    pub fn smoke(&self) -> &Smoke {
        &self.smoke
    }

    pub fn clouds(&self) -> &Clouds {
        &self.clouds
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn is_night(&self) -> bool {
        self.night
    }

    pub fn horn_enabled(&self) -> bool {
        self.horn.is_enabled()
    }

    pub fn follows_train(&self) -> bool {
        self.follow_train
    }

    fn apply_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::ToggleDayNight => {
                self.night = !self.night;
                log::info!("[railway] night={}", self.night);
            }
            KeyAction::TogglePause => {
                let running = self.train.toggle_running();
                log::info!("[railway] running={running}");
            }
            KeyAction::ToggleSpeed => {
                let speed = self.train.toggle_speed();
                log::info!("[railway] speed={speed:?}");
            }
            KeyAction::ToggleHorn => {
                let on = self.horn.toggle();
                log::info!("[railway] horn={on}");
            }
            KeyAction::AddWagon => {
                if !self.train.add_wagon() {
                    log::info!("[railway] train is full ({TRAIN_MAX_WAGONS} wagons)");
                }
            }
            KeyAction::RemoveWagon => {
                self.train.remove_wagon();
            }
            KeyAction::RotateCamera => {
                self.rig.rotate_step();
            }
            KeyAction::FollowTrain => {
                self.follow_train = !self.follow_train;
            }
            KeyAction::ScrollUp | KeyAction::ScrollDown => {}
        }
    }

    fn camera_right_up(&self) -> (Vec3, Vec3) {
        let forward = (self.camera.target - self.camera.eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        (right, right.cross(forward))
    }

    fn push_celestial(&self, out: &mut SceneFrame) {
        let (body, color) = if self.night {
            (MOON_POSITION, rgb(0xF4F1DE))
        } else {
            (SUN_POSITION, rgb(0xFFD93D))
        };
        out.push(body, 9.0, color);
        let (right, up) = self.camera_right_up();
        let body_ndc = self
            .camera
            .project(body)
            .map(|p| p.truncate())
            .unwrap_or(Vec2::ZERO);
        let look = pupil_offset(self.pointer_ndc, body_ndc, CELESTIAL_EYE_RADIUS);
        for side in [-1.0f32, 1.0] {
            let eye = body + right * side * 1.6 + up * 0.8;
            out.push(eye, CELESTIAL_EYE_RADIUS * 2.0, rgb(0xffffff));
            out.push(eye + right * look.x + up * look.y, 0.7, rgb(0x111111));
        }
    }

    fn push_world(&self, out: &mut SceneFrame) {
        let t = self.elapsed;
        let ground = if self.night {
            rgb(0x2d4a2d)
        } else {
            rgb(0x7EC850)
        };
        let mut x = -60.0;
        while x <= 60.0 {
            let mut z = -60.0;
            while z <= 60.0 {
                out.push(Vec3::new(x, -0.6, z), 7.0, ground);
                z += 6.0;
            }
            x += 6.0;
        }

        let rail = rgb(0x8B7355);
        let sleepers = (self.track.perimeter() / 1.5) as usize;
        for i in 0..sleepers {
            let p = self.track.evaluate(i as f32 / sleepers as f32);
            out.push(p.position, 0.9, rail);
        }

        for (i, tree) in ObstacleList::trees().enumerate() {
            let sway = (t * 0.5 + i as f32 * 0.3).sin() * 0.02;
            out.push(Vec3::new(tree.x, 1.0, tree.y), 0.8, rgb(0x8B5E3C));
            out.push(
                Vec3::new(tree.x + sway * 40.0, 3.2, tree.y),
                3.2,
                rgb(0x27AE60),
            );
        }
        let window = if self.night {
            rgb(0xFFD700)
        } else {
            rgb(0xAED6F1)
        };
        for house in ObstacleList::houses() {
            out.push(Vec3::new(house.x, 2.0, house.y), 5.0, rgb(0xFAE5D3));
            out.push(Vec3::new(house.x, 5.0, house.y), 4.0, rgb(0xE74C3C));
            out.push(Vec3::new(house.x, 2.2, house.y + 2.6), 1.0, window);
        }

        let station = self.track.station_position();
        out.push(station + Vec3::Y * 2.0, 6.0, rgb(0xE67E22));

        let mill = Vec3::new(WINDMILL_POSITION[0], 0.0, WINDMILL_POSITION[1]);
        out.push(mill + Vec3::Y * 3.0, 3.5, rgb(0xFDF2E9));
        let hub = mill + Vec3::new(0.0, 5.5, 1.2);
        for k in 0..4 {
            let a = self.windmill + k as f32 * FRAC_PI_2;
            for s in 1..=3 {
                let r = s as f32 * 1.1;
                out.push(hub + Vec3::new(a.cos() * r, a.sin() * r, 0.0), 0.7, rgb(0xD5C4A1));
            }
        }

        let pond = Vec3::new(POND_POSITION[0], -0.3, POND_POSITION[1]);
        let water = out.markers.len();
        for k in 0..7 {
            let a = k as f32 / 7.0 * TAU;
            out.push(pond + Vec3::new(a.cos() * 4.5, 0.0, a.sin() * 4.5), 5.0, rgb(0x5DADE2));
        }
        out.push(pond, 6.0, rgb(0x5DADE2));
        let alpha = 0.6 + (t * 2.0).sin() * 0.1;
        for m in &mut out.markers[water..] {
            m.color[3] = alpha;
        }
    }

    fn push_agents(&self, out: &mut SceneFrame) {
        let t = self.elapsed;
        for car in self.train.cars(&self.track) {
            let dir = car.point.direction();
            let size = if car.is_locomotive { 3.2 } else { 2.8 };
            out.push(car.point.position + Vec3::Y * 1.4, size, car.color);
            let w = self.train.wheel_angle();
            let wheel = car.point.position + dir * w.cos() * 0.7 + Vec3::Y * (0.5 + w.sin() * 0.3);
            out.push(wheel, 0.6, rgb(0x2C3E50));
        }

        for s in self.flock.sheep() {
            let base = Vec3::new(s.position.x, 0.0, s.position.y);
            let dir = Vec3::new(s.heading.cos(), 0.0, s.heading.sin());
            out.push(base + Vec3::Y * (1.1 + s.head_bob), 2.0, rgb(0xF5F5F0));
            out.push(base + dir * 1.3 + Vec3::Y * 1.25, 0.9, rgb(0x3D3D3D));
            for (along, swing) in [(0.6, s.leg_swing), (-0.6, -s.leg_swing)] {
                let foot = base + dir * (along + swing * 0.4) + Vec3::Y * 0.3;
                out.push(foot, 0.35, rgb(0x8B7355));
            }
        }

        for c in self.clouds.clouds() {
            for k in 0..c.puffs {
                let offset = Vec3::new(k as f32 * 1.4 - c.puffs as f32 * 0.7, (k % 2) as f32 * 0.5, 0.0);
                out.markers.push(
                    Marker::new(c.position + offset, 3.0, rgb(0xFFFFFF)).with_alpha(0.9),
                );
            }
        }

        let v = self.sky.vehicle();
        let dir = Vec3::new(v.heading.cos(), 0.0, v.heading.sin());
        match v.kind {
            SkyVehicleKind::Plane => {
                out.push(v.position, 2.4, rgb(0xECF0F1));
                let side = dir.cross(Vec3::Y);
                out.push(v.position + side * 2.0, 1.2, rgb(0xE74C3C));
                out.push(v.position - side * 2.0, 1.2, rgb(0xE74C3C));
                let prop = v.position + dir * 1.6 + Vec3::Y * v.propeller.sin() * 0.4;
                out.push(prop, 0.5, rgb(0x2C3E50));
            }
            SkyVehicleKind::Balloon => {
                out.push(v.position + Vec3::Y * 2.5, 5.0, rgb(0xE74C3C));
                out.push(v.position - Vec3::Y * 0.8 + Vec3::Y * (t * 0.4).cos() * 0.05, 1.0, rgb(0x8B5E3C));
            }
        }

        for puff in self.smoke.puffs() {
            out.markers.push(
                Marker::new(puff.position, puff.radius * 2.0 * puff.scale(), rgb(0xCCCCCC))
                    .with_alpha(puff.opacity()),
            );
        }
    }
}

impl Scene for RailwayScene {
    fn update(&mut self, time: FrameTime) {
        self.elapsed = time.elapsed;

        self.train.step(&self.track, &mut self.train_events);
        for ev in self.train_events.drain(..) {
            match ev {
                TrainEvent::PassedStation => {
                    if self.horn.request(self.elapsed) {
                        log::info!("[railway] station horn at {:.1}s", self.elapsed);
                        self.events.push(SceneEvent::Horn);
                    }
                }
            }
        }

        let look = if self.follow_train {
            LookAt::Point(self.track.evaluate(self.train.progress()).position)
        } else {
            LookAt::Origin
        };
        self.rig.set_look_at(look);
        self.rig.step(time.dt);
        self.rig.apply(&mut self.camera);

        let chimney = self
            .train
            .is_running()
            .then(|| self.train.chimney(&self.track));
        self.smoke.step(chimney, &mut self.rng);
        if self.sky.step(self.elapsed, &mut self.rng) {
            log::debug!("[railway] new sky vehicle: {:?}", self.sky.vehicle().kind);
        }
        self.flock.step(self.elapsed, &self.field, &mut self.rng);
        self.clouds.step();
        self.windmill += WINDMILL_SPIN_PER_FRAME;
    }

    fn handle_input(&mut self, input: &SceneInput) {
        match input {
            SceneInput::PointerDown { pos } => self.gesture = Gesture::Drag(*pos),
            SceneInput::PointerMove { pos } => {
                self.pointer_ndc = self.viewport.to_ndc(*pos);
                if let Gesture::Drag(prev) = self.gesture {
                    self.rig.drag(pos.x - prev.x, pos.y - prev.y);
                    self.gesture = Gesture::Drag(*pos);
                }
            }
            SceneInput::PointerUp { .. } => self.gesture = Gesture::None,
            SceneInput::Wheel { delta_y } => self.rig.wheel(*delta_y),
            SceneInput::TouchStart { points } => {
                self.gesture = match points.as_slice() {
                    [p] => Gesture::Drag(*p),
                    [a, b, ..] => Gesture::Pinch(a.distance(*b)),
                    [] => Gesture::None,
                };
            }
            SceneInput::TouchMove { points } => match (points.as_slice(), self.gesture) {
                ([p], Gesture::Drag(prev)) => {
                    self.rig.touch_drag(p.x - prev.x, p.y - prev.y);
                    self.gesture = Gesture::Drag(*p);
                }
                ([a, b, ..], Gesture::Pinch(prev)) => {
                    let d = a.distance(*b);
                    self.rig.pinch(d - prev);
                    self.gesture = Gesture::Pinch(d);
                }
                ([a, b, ..], _) => self.gesture = Gesture::Pinch(a.distance(*b)),
                _ => {}
            },
            SceneInput::TouchEnd => self.gesture = Gesture::None,
            SceneInput::Key(action) => self.apply_key(*action),
            SceneInput::Click { .. } => {}
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
        *out = SceneFrame::new(if self.night {
            rgb(0x1a1a3e)
        } else {
            rgb(0x87CEEB)
        });
        self.push_world(out);
        self.push_agents(out);
        self.push_celestial(out);
    }

    fn label(&self) -> Option<String> {
        let state = if self.train.is_running() {
            match self.train.speed() {
                TrainSpeed::Slow => "slow",
                TrainSpeed::Fast => "fast",
            }
        } else {
            "paused"
        };
        Some(format!("{} wagons · {state}", self.train.wagon_count()))
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
