//! Circular keep-out zones for the railway field.

use crate::constants::*;
use crate::path::OvalTrack;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            radius,
        }
    }

    /// Strictly inside; a point on the rim is free.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) < self.radius * self.radius
    }
}

const OUTER_TREES: [[f32; 2]; 25] = [
    [42.0, 5.0],
    [45.0, -10.0],
    [38.0, 15.0],
    [48.0, 0.0],
    [37.0, -22.0],
    [50.0, 12.0],
    [47.0, -15.0],
    [40.0, 25.0],
    [55.0, -5.0],
    [36.0, -30.0],
    [55.0, 8.0],
    [50.0, 20.0],
    [58.0, -3.0],
    [42.0, -28.0],
    [48.0, 25.0],
    [-40.0, 12.0],
    [-45.0, -8.0],
    [-38.0, 20.0],
    [-50.0, 0.0],
    [-42.0, -18.0],
    [-48.0, 15.0],
    [-35.0, 28.0],
    [-55.0, -5.0],
    [-38.0, -25.0],
    [-52.0, 10.0],
];

// inside the oval
const INNER_TREES: [[f32; 2]; 12] = [
    [0.0, 0.0],
    [4.0, -5.0],
    [-5.0, 4.0],
    [6.0, 6.0],
    [-4.0, -6.0],
    [-7.0, 0.0],
    [0.0, 8.0],
    [8.0, -3.0],
    [-6.0, -7.0],
    [3.0, -8.0],
    [7.0, 4.0],
    [-8.0, 5.0],
];

const HOUSES: [[f32; 2]; 3] = [[42.0, -30.0], [-42.0, 22.0], [22.0, 35.0]];

pub const WINDMILL_POSITION: [f32; 2] = [-35.0, -28.0];
pub const POND_POSITION: [f32; 2] = [-40.0, 30.0];

/// Static obstacle set, built once after scenery placement.
#[derive(Clone, Debug, Default)]
pub struct ObstacleList {
    items: Vec<Obstacle>,
}

impl ObstacleList {
    pub fn new(items: Vec<Obstacle>) -> Self {
        Self { items }
    }

    /// Trees, houses, windmill, station, pond and bridge of the railway world.
    pub fn farm(track: &OvalTrack) -> Self {
        let mut items = Vec::with_capacity(OUTER_TREES.len() + INNER_TREES.len() + 8);
        for [x, z] in OUTER_TREES.iter().chain(INNER_TREES.iter()) {
            items.push(Obstacle::new(*x, *z, TREE_OBSTACLE_RADIUS));
        }
        for [x, z] in HOUSES {
            items.push(Obstacle::new(x, z, HOUSE_OBSTACLE_RADIUS));
        }
        items.push(Obstacle::new(WINDMILL_POSITION[0], WINDMILL_POSITION[1], 4.0));
        let station = track.station_position();
        items.push(Obstacle::new(station.x, station.z, 8.0));
        items.push(Obstacle::new(POND_POSITION[0], POND_POSITION[1], 10.0));
        items.push(Obstacle::new(-37.0, 27.0, 3.0)); // bridge
        Self { items }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.items.push(obstacle);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.items.iter().any(|o| o.contains(p))
    }

    /// Tree positions, for scenery markers.
    pub fn trees() -> impl Iterator<Item = Vec2> {
        OUTER_TREES
            .iter()
            .chain(INNER_TREES.iter())
            .map(|[x, z]| Vec2::new(*x, *z))
    }

    pub fn houses() -> impl Iterator<Item = Vec2> {
        HOUSES.iter().map(|[x, z]| Vec2::new(*x, *z))
    }
}

/// Everything a wandering agent must stay out of.
#[derive(Clone, Debug)]
pub struct Field {
    pub obstacles: ObstacleList,
    pub track: OvalTrack,
    pub corridor_margin: f32,
    pub limit: f32,
}

impl Field {
    pub fn new(track: OvalTrack, obstacles: ObstacleList) -> Self {
        Self {
            obstacles,
            track,
            corridor_margin: TRACK_CORRIDOR_MARGIN,
            limit: SHEEP_FIELD_LIMIT,
        }
    }

    /// Static part of the blocked test; other agents are checked by the caller.
    pub fn is_blocked(&self, p: Vec2) -> bool {
        p.x.abs() > self.limit
            || p.y.abs() > self.limit
            || self.track.is_near(p, self.corridor_margin)
            || self.obstacles.contains(p)
    }
}
