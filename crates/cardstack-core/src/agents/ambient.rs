use glam::Vec3;
use rand::prelude::*;

/// A chimney puff. Lifetime counts frames.
#[derive(Clone, Copy, Debug)]
pub struct SmokePuff {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub life: u32,
    pub max_life: u32,
}

impl SmokePuff {
    pub fn scale(&self) -> f32 {
        1.0 + self.life as f32 * 0.03
    }

    pub fn opacity(&self) -> f32 {
        0.5 * (1.0 - self.life as f32 / self.max_life.max(1) as f32)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Smoke {
    puffs: Vec<SmokePuff>,
}

impl Smoke {
    pub fn puffs(&self) -> &[SmokePuff] {
        &self.puffs
    }

    /// Age and drift existing puffs; with `emit_at`, maybe add a new one there.
    pub fn step<R: Rng + ?Sized>(&mut self, emit_at: Option<Vec3>, rng: &mut R) {
        if let Some(origin) = emit_at {
            if rng.gen::<f32>() > 0.5 {
                self.puffs.push(SmokePuff {
                    position: origin,
                    velocity: Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 0.02,
                        0.05 + rng.gen::<f32>() * 0.03,
                        (rng.gen::<f32>() - 0.5) * 0.02,
                    ),
                    radius: 0.2 + rng.gen::<f32>() * 0.2,
                    life: 0,
                    max_life: 60 + (rng.gen::<f32>() * 30.0) as u32,
                });
            }
        }
        for puff in &mut self.puffs {
            puff.life += 1;
            puff.position += puff.velocity;
        }
        self.puffs.retain(|p| p.life < p.max_life);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Cloud {
    pub position: Vec3,
    pub speed: f32,
    /// Number of blobs in the cloud, for rendering.
    pub puffs: u8,
}

/// Clouds drifting along +X and wrapping at the edge of the sky.
#[derive(Clone, Debug, Default)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

pub const CLOUD_WRAP_X: f32 = 80.0;

impl Clouds {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let clouds = (0..count)
            .map(|_| Cloud {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 140.0,
                    18.0 + rng.gen::<f32>() * 12.0,
                    (rng.gen::<f32>() - 0.5) * 140.0,
                ),
                speed: 0.02 + rng.gen::<f32>() * 0.03,
                puffs: 3 + (rng.gen::<f32>() * 4.0) as u8,
            })
            .collect();
        Self { clouds }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn step(&mut self) {
        for c in &mut self.clouds {
            c.position.x += c.speed;
            if c.position.x > CLOUD_WRAP_X {
                c.position.x = -CLOUD_WRAP_X;
            }
        }
    }
}
