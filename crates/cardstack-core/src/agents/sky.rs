use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkyVehicleKind {
    Plane,
    Balloon,
}

/// A plane or balloon crossing the sky in a straight line.
#[derive(Clone, Copy, Debug)]
pub struct SkyVehicle {
    pub kind: SkyVehicleKind,
    pub position: Vec3,
    /// Travel direction in the XZ plane, radians from +X toward +Z.
    pub heading: f32,
    /// World units per frame.
    pub speed: f32,
    pub cruise_height: f32,
    pub propeller: f32,
}

impl SkyVehicle {
    /// Spawn on the spawn ring at a random bearing, heading back across the centre.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = if rng.gen::<f32>() > 0.5 {
            SkyVehicleKind::Plane
        } else {
            SkyVehicleKind::Balloon
        };
        let bearing = rng.gen::<f32>() * TAU;
        let (cruise_height, speed) = match kind {
            SkyVehicleKind::Plane => (28.0 + rng.gen::<f32>() * 8.0, PLANE_SPEED),
            SkyVehicleKind::Balloon => (22.0 + rng.gen::<f32>() * 6.0, BALLOON_SPEED),
        };
        let heading = bearing + PI + (rng.gen::<f32>() - 0.5) * 0.6;
        log::debug!("[sky] spawned {kind:?} at bearing {bearing:.2}");
        Self {
            kind,
            position: Vec3::new(
                bearing.cos() * SKY_SPAWN_DIST,
                cruise_height,
                bearing.sin() * SKY_SPAWN_DIST,
            ),
            heading,
            speed,
            cruise_height,
            propeller: 0.0,
        }
    }

    /// Advance one frame. Returns false once the vehicle has left the sky.
    pub fn step(&mut self, t: f32) -> bool {
        self.position.x += self.heading.cos() * self.speed;
        self.position.z += self.heading.sin() * self.speed;
        match self.kind {
            SkyVehicleKind::Plane => self.propeller += 0.5,
            SkyVehicleKind::Balloon => {
                self.position.y = self.cruise_height + (t * 0.4).sin() * 1.5;
            }
        }
        let horizontal_sq = self.position.x * self.position.x + self.position.z * self.position.z;
        horizontal_sq <= SKY_DESPAWN_DIST * SKY_DESPAWN_DIST
    }
}

/// Keeps exactly one vehicle in the sky, replacing it when it flies off.
#[derive(Clone, Debug)]
pub struct Sky {
    vehicle: SkyVehicle,
}

impl Sky {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            vehicle: SkyVehicle::spawn(rng),
        }
    }

    pub fn vehicle(&self) -> &SkyVehicle {
        &self.vehicle
    }

    /// Returns true when the vehicle was replaced this frame.
    pub fn step<R: Rng + ?Sized>(&mut self, t: f32, rng: &mut R) -> bool {
        if self.vehicle.step(t) {
            false
        } else {
            self.vehicle = SkyVehicle::spawn(rng);
            true
        }
    }
}
