// Shared geometry, smoothing and agent tuning used by every front-end.

use std::f32::consts::PI;

// ---------------- Smoothing ----------------
/// Scroll values closer than this to their target snap onto it.
pub const SETTLE_EPSILON: f32 = 0.01;

pub const DECK_SMOOTHING: f32 = 0.12; // mouse and pull-back transforms
pub const DECK_PREVIEW_SMOOTHING: f32 = 0.1; // next-card preview amount
pub const STAIR_SCROLL_SMOOTHING: f32 = 0.06;
pub const FORMATION_SCROLL_SMOOTHING: f32 = 0.08;
pub const FORMATION_NODE_SMOOTHING: f32 = 0.045;
pub const ORBIT_THETA_SMOOTHING: f32 = 0.08;
pub const ORBIT_PHI_SMOOTHING: f32 = 0.05;
pub const ORBIT_RADIUS_SMOOTHING: f32 = 0.08;
pub const SHEEP_TURN_SMOOTHING: f32 = 0.04;

// ---------------- Frame clock ----------------
/// Upper bound on a single frame step, in seconds (tab switches, debugger pauses).
pub const MAX_FRAME_DT_SEC: f32 = 0.05;

// ---------------- Oval railway ----------------
pub const TRACK_STRAIGHT_LEN: f32 = 22.0;
pub const TRACK_TURN_RADIUS: f32 = 14.0;
pub const TRACK_WIDTH: f32 = 3.5;
pub const TRACK_CORRIDOR_MARGIN: f32 = 5.0; // sheep keep this far from the centreline

pub const TRAIN_SPEED_SLOW: f32 = 0.0012; // progress per frame
pub const TRAIN_SPEED_FAST: f32 = 0.003;
pub const TRAIN_CAR_SPACING: f32 = 4.8; // world units between car centres
pub const TRAIN_START_WAGONS: usize = 3;
pub const TRAIN_MAX_WAGONS: usize = 8;
pub const TRAIN_WHEEL_SPIN_PER_FRAME: f32 = 0.15;
pub const HORN_COOLDOWN_SEC: f32 = 5.0;

pub const WAGON_COLORS: [[f32; 3]; 6] = [
    [0.20, 0.60, 0.86], // blue
    [0.15, 0.68, 0.38], // green
    [0.95, 0.61, 0.07], // yellow
    [0.61, 0.35, 0.71], // purple
    [0.90, 0.49, 0.13], // orange
    [0.91, 0.12, 0.39], // pink
];
pub const LOCOMOTIVE_COLOR: [f32; 3] = [0.91, 0.30, 0.24];

// ---------------- Sheep ----------------
pub const SHEEP_COUNT: usize = 12;
pub const SHEEP_SPAWN_ATTEMPTS: usize = 80;
pub const SHEEP_SPAWN_HALF_EXTENT: f32 = 40.0;
pub const SHEEP_TARGET_ATTEMPTS: usize = 30;
pub const SHEEP_CONE_HALF_ANGLE: f32 = PI * 0.35;
pub const SHEEP_TARGET_MIN_DIST: f32 = 4.0;
pub const SHEEP_TARGET_DIST_SPAN: f32 = 10.0;
pub const SHEEP_TARGET_CLAMP: f32 = 52.0;
pub const SHEEP_REVERSE_DIST: f32 = 5.0;
pub const SHEEP_FIELD_LIMIT: f32 = 55.0;
pub const SHEEP_MIN_SEPARATION: f32 = 2.0;
pub const SHEEP_ARRIVE_DIST: f32 = 0.5;
pub const SHEEP_SPEED_MIN: f32 = 0.008; // world units per frame
pub const SHEEP_SPEED_SPAN: f32 = 0.008;
pub const SHEEP_EAT_PROBABILITY: f32 = 0.25;
pub const SHEEP_LEG_SWING: f32 = 0.35;
pub const SHEEP_LEG_DECAY: f32 = 0.9;
pub const SHEEP_BLOCKED_RETRY_SEC: f32 = 0.5;

// ---------------- Scenery obstacles ----------------
pub const TREE_OBSTACLE_RADIUS: f32 = 2.5;
pub const HOUSE_OBSTACLE_RADIUS: f32 = 5.0;

// ---------------- Sky vehicles ----------------
pub const SKY_SPAWN_DIST: f32 = 100.0;
pub const SKY_DESPAWN_DIST: f32 = 130.0;
pub const PLANE_SPEED: f32 = 0.35;
pub const BALLOON_SPEED: f32 = 0.12;
pub const CLOUD_COUNT: usize = 14;

// ---------------- Orbit camera ----------------
pub const ORBIT_PHI_MIN: f32 = 0.3;
pub const ORBIT_PHI_MAX: f32 = PI / 2.2;
pub const ORBIT_RADIUS_MIN: f32 = 30.0;
pub const ORBIT_RADIUS_MAX: f32 = 120.0;
pub const ORBIT_DEFAULT_THETA: f32 = -PI / 2.0;
pub const ORBIT_DEFAULT_PHI: f32 = PI / 3.2;
pub const ORBIT_DEFAULT_RADIUS: f32 = 75.0;
pub const ORBIT_ROTATE_STEPS: u32 = 6;

pub const DRAG_THETA_PER_PX: f32 = 0.005;
pub const DRAG_PHI_PER_PX: f32 = 0.003;
pub const TOUCH_THETA_PER_PX: f32 = 0.008;
pub const TOUCH_PHI_PER_PX: f32 = 0.005;
pub const WHEEL_ZOOM_PER_DELTA: f32 = 0.05;
pub const PINCH_ZOOM_PER_PX: f32 = 0.1;

// ---------------- Spiral staircase ----------------
pub const STAIR_COUNT: u32 = 30;
pub const STAIR_HEIGHT: f32 = 1.8;
pub const STAIR_ANGLE_DEG: f32 = 24.0;
pub const STAIR_INNER_RADIUS: f32 = 1.5;
pub const STAIR_OUTER_RADIUS: f32 = 6.0;
pub const STAIR_THICKNESS: f32 = 0.3;
pub const STAIR_EYE_HEIGHT: f32 = 1.6;
pub const STAIR_CAMERA_INSET: f32 = 1.2; // camera walks this far inside the outer edge
pub const STAIR_LOOK_AHEAD_STEPS: f32 = 2.5;
pub const STAIR_FRAME_STEPS: [u32; 6] = [4, 9, 14, 19, 24, 29];
pub const STAIR_FRAME_PICK_RADIUS: f32 = 0.8;

/// Shared range for the scroll-driven cards.
pub const SCROLL_MAX: f32 = 100.0;
pub const STAIR_WHEEL_STEP: f32 = 2.0;
pub const STAIR_TOUCH_SCALE: f32 = 0.25;
pub const STAIR_BURST_AT: f32 = 85.0;
pub const STAIR_BURST_REARM_BELOW: f32 = 75.0;

// ---------------- Formation field ----------------
pub const FORMATION_NODE_COUNT: usize = 80;
pub const FORMATION_LINK_DIST_SQ: f32 = 20.0;
pub const FORMATION_MAX_LINK_VERTICES_PER_NODE: usize = 12;
pub const FORMATION_LINK_EVERY_FRAMES: u64 = 3;
pub const FORMATION_WOBBLE: f32 = 0.25;
pub const FORMATION_WHEEL_STEP: f32 = 2.5;
pub const FORMATION_WHEEL_COOLDOWN_SEC: f32 = 0.06;
pub const FORMATION_TOUCH_SCALE: f32 = 0.35;

// ---------------- Deck ----------------
pub const DECK_WHEEL_GAIN: f32 = 0.8;
pub const DECK_WHEEL_THRESHOLD: f32 = 250.0;
pub const DECK_WHEEL_QUIET_SEC: f32 = 0.8; // accumulator resets after this much wheel silence
pub const DECK_SWIPE_MIN_PX: f32 = 50.0;
pub const DECK_TRANSITION_SEC: f32 = 0.85;
pub const DECK_FULLSCREEN_SEC: f32 = 0.6;
pub const DECK_PARALLAX_PUSH: f32 = 50.0; // px at full pointer distance
pub const DECK_SHADOW_SPREAD: f32 = 20.0;
pub const DECK_SHADOW_DROP: f32 = 40.0;
pub const DECK_PREVIEW_MIN_PULL: f32 = 5.0; // accumulator units before the next card shows

// ---------------- Flip board ----------------
/// Board coordinates are normalized to the card, `(0, 0)` top left.
pub const AVATAR_START: [f32; 2] = [0.5, 0.08];
pub const AVATAR_HALF_SIZE: [f32; 2] = [0.03, 0.045];
pub const AVATAR_SMOOTHING: f32 = 0.08;
pub const AVATAR_SNAP_EPSILON: f32 = 0.001;
pub const AVATAR_TARGET_MIN: f32 = 0.05;
pub const AVATAR_TARGET_MAX: f32 = 0.95;
pub const FLIP_GRID: [usize; 2] = [3, 3]; // columns, rows
pub const FLIP_ITEM_HALF_SIZE: [f32; 2] = [0.08, 0.09];
pub const FLIP_ITEM_JITTER: f32 = 0.03;
