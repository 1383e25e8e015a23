//! Particle field morphing between five formations as the card scrolls.

use crate::constants::*;
use crate::error::ConfigError;
use crate::smoothing::{smooth, smoothstep};
use fnv::FnvHashMap;
use glam::{IVec3, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Formation {
    Sphere,
    Helix,
    Cube,
    Torus,
    Scatter,
}

impl Formation {
    /// Scroll order.
    pub const ALL: [Formation; 5] = [
        Formation::Sphere,
        Formation::Helix,
        Formation::Cube,
        Formation::Torus,
        Formation::Scatter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Formation::Sphere => "SPHERE",
            Formation::Helix => "HELIX",
            Formation::Cube => "CUBE",
            Formation::Torus => "TORUS",
            Formation::Scatter => "SCATTER",
        }
    }

    /// Resting position of node `index` out of `total`.
    pub fn position(self, index: usize, total: usize) -> Vec3 {
        let total = total.max(1);
        let t = index as f32 / total as f32;
        match self {
            Formation::Sphere => {
                let golden = (1.0 + 5f32.sqrt()) / 2.0;
                let phi = (1.0 - 2.0 * t).clamp(-1.0, 1.0).acos();
                let theta = TAU * index as f32 * golden;
                let r = 8.0;
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.sin() * theta.sin(),
                    r * phi.cos(),
                )
            }
            Formation::Helix => {
                let angle = t * PI * 8.0;
                let r = 5.0;
                Vec3::new(r * angle.cos(), (t - 0.5) * 18.0, r * angle.sin())
            }
            Formation::Cube => {
                let side = (total as f32).cbrt().ceil().max(1.0) as usize;
                let ix = index % side;
                let iy = (index / side) % side;
                let iz = index / (side * side);
                let s = 14.0 / side as f32;
                let half = side as f32 / 2.0;
                Vec3::new(
                    (ix as f32 - half + 0.5) * s,
                    (iy as f32 - half + 0.5) * s,
                    (iz as f32 - half + 0.5) * s,
                )
            }
            Formation::Torus => {
                let (big, small) = (6.0, 2.5);
                let u = t * TAU * 5.0;
                let v = t * TAU * 13.0;
                Vec3::new(
                    (big + small * v.cos()) * u.cos(),
                    (big + small * v.cos()) * u.sin(),
                    small * v.sin(),
                )
            }
            Formation::Scatter => scatter_position(index),
        }
    }
}

/// Deterministic pseudo-random spot in a 24-unit cube.
pub fn scatter_position(index: usize) -> Vec3 {
    let a = (index as u32).wrapping_mul(2_654_435_761);
    let unit = |shift: u32| (((a >> shift) & 0xFFFF) as f32 / 65535.0 - 0.5) * 24.0;
    Vec3::new(unit(0), unit(8), unit(16))
}

/// Which pair of formations a scroll progress sits between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationBlend {
    pub from: Formation,
    pub to: Formation,
    /// Smoothstep-eased weight of `to`.
    pub eased: f32,
    /// Progress scaled onto formation indices, `0..=4`.
    pub raw: f32,
}

impl FormationBlend {
    pub fn at(progress: f32) -> Self {
        let n = Formation::ALL.len();
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let raw = p * (n - 1) as f32;
        let from_i = (raw.floor() as usize).min(n - 2);
        Self {
            from: Formation::ALL[from_i],
            to: Formation::ALL[from_i + 1],
            eased: smoothstep(raw - from_i as f32),
            raw,
        }
    }

    /// Formation closest to the current progress, for the HUD label.
    pub fn nearest(&self) -> Formation {
        let i = (self.raw.round() as usize).min(Formation::ALL.len() - 1);
        Formation::ALL[i]
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub position: Vec3,
    targets: [Vec3; 5],
    pub accent: bool,
    pub scale: f32,
}

impl Node {
    pub fn target(&self, formation: Formation) -> Vec3 {
        let i = Formation::ALL
            .iter()
            .position(|f| *f == formation)
            .unwrap_or(0);
        self.targets[i]
    }
}

/// Nodes, their links and the frame counter gating link rebuilds.
#[derive(Clone, Debug)]
pub struct FormationField {
    nodes: Vec<Node>,
    links: Vec<[Vec3; 2]>,
    frame: u64,
    max_link_vertices: usize,
}

impl FormationField {
    /// Every node starts at its scatter spot.
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::NonPositive {
                name: "node_count",
                value: 0.0,
            });
        }
        let nodes = (0..count)
            .map(|i| {
                let targets = Formation::ALL.map(|f| f.position(i, count));
                Node {
                    position: scatter_position(i),
                    targets,
                    accent: i % 5 == 0,
                    scale: 1.0,
                }
            })
            .collect();
        Ok(Self {
            nodes,
            links: Vec::new(),
            frame: 0,
            max_link_vertices: count * FORMATION_MAX_LINK_VERTICES_PER_NODE,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Line segments from the last rebuild.
    pub fn links(&self) -> &[[Vec3; 2]] {
        &self.links
    }

    pub fn max_link_vertices(&self) -> usize {
        self.max_link_vertices
    }

    /// One frame at elapsed time `t` and scroll progress `0..1`.
    pub fn step(&mut self, t: f32, progress: f32) -> FormationBlend {
        let blend = FormationBlend::at(progress);
        let from_i = Formation::ALL.iter().position(|f| *f == blend.from).unwrap_or(0);
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let fi = i as f32;
            let wobble = Vec3::new(
                (t * 0.8 + fi * 0.5).sin(),
                (t * 0.6 + fi * 0.7).cos(),
                (t * 0.7 + fi * 0.3).sin(),
            ) * FORMATION_WOBBLE;
            let a = node.targets[from_i];
            let b = node.targets[from_i + 1];
            let goal = a.lerp(b, blend.eased) + wobble;
            node.position = Vec3::new(
                smooth(node.position.x, goal.x, FORMATION_NODE_SMOOTHING),
                smooth(node.position.y, goal.y, FORMATION_NODE_SMOOTHING),
                smooth(node.position.z, goal.z, FORMATION_NODE_SMOOTHING),
            );
            if node.accent {
                node.scale = 1.0 + (t * 2.0 + fi).sin() * 0.25;
            }
        }

        self.frame += 1;
        if self.frame % FORMATION_LINK_EVERY_FRAMES == 0 {
            self.rebuild_links();
        }
        blend
    }

    /// Connect node pairs closer than the link distance, up to the vertex cap.
    ///
    /// Nodes are bucketed into a uniform grid with cells one link-distance wide,
    /// so each node only checks its 27 neighbouring cells.
    pub fn rebuild_links(&mut self) {
        self.links.clear();
        let cell = FORMATION_LINK_DIST_SQ.sqrt();
        let key = |p: Vec3| (p / cell).floor().as_ivec3();

        let mut grid: FnvHashMap<IVec3, SmallVec<[usize; 8]>> = FnvHashMap::default();
        for (i, n) in self.nodes.iter().enumerate() {
            grid.entry(key(n.position)).or_default().push(i);
        }

        let max_links = self.max_link_vertices / 2;
        for (i, a) in self.nodes.iter().enumerate() {
            let k = key(a.position);
            for dz in -1..=1 {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let Some(bucket) = grid.get(&(k + IVec3::new(dx, dy, dz))) else {
                            continue;
                        };
                        for &j in bucket.iter().filter(|&&j| j > i) {
                            let b = self.nodes[j].position;
                            if a.position.distance_squared(b) < FORMATION_LINK_DIST_SQ {
                                if self.links.len() >= max_links {
                                    return;
                                }
                                self.links.push([a.position, b]);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Auto-orbiting camera eye for the formation card.
pub fn formation_camera_eye(t: f32, progress: f32) -> Vec3 {
    let angle = t * 0.12 + progress * TAU;
    let dist = 22.0 - progress * 5.0;
    Vec3::new(
        angle.cos() * dist,
        (t * 0.08).sin() * 2.0 + progress * 4.0,
        angle.sin() * dist,
    )
}
