use super::{Scene, SceneInput, Viewport};
use crate::camera::Camera;
use crate::constants::*;
use crate::error::{require_positive, ConfigError};
use crate::frame::FrameTime;
use crate::render::{rgb, SceneFrame};
use crate::smoothing::smooth;
use fnv::FnvHashSet;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Board extent in world units; the camera looks straight at it.
const BOARD_SIZE: Vec2 = Vec2::new(16.0, 10.0);

#[derive(Clone, Debug)]
pub struct FlipConfig {
    pub columns: usize,
    pub rows: usize,
    pub seed: u64,
    pub fovy_degrees: f32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            columns: FLIP_GRID[0],
            rows: FLIP_GRID[1],
            seed: 1,
            fovy_degrees: 50.0,
        }
    }
}

/// Axis-aligned box in board coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardRect {
    pub center: Vec2,
    pub half: Vec2,
}

impl BoardRect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &BoardRect) -> bool {
        let gap = (self.center - other.center).abs() - (self.half + other.half);
        gap.x <= 0.0 && gap.y <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AvatarState {
    Idle,
    Moving { target: Vec2 },
}

/// Avatar walking to clicked points; items it brushes against flip over for good.
#[derive(Clone, Debug)]
pub struct FlipScene {
    avatar: Vec2,
    state: AvatarState,
    items: Vec<BoardRect>,
    flipped: FnvHashSet<usize>,
    just_entered: bool,
    viewport: Viewport,
    camera: Camera,
}

impl FlipScene {
    pub fn new(config: FlipConfig) -> Result<Self, ConfigError> {
        require_positive("columns", config.columns as f32)?;
        require_positive("rows", config.rows as f32)?;
        require_positive("fovy_degrees", config.fovy_degrees)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let half = Vec2::from(FLIP_ITEM_HALF_SIZE);
        let mut items = Vec::with_capacity(config.columns * config.rows);
        for row in 0..config.rows {
            for col in 0..config.columns {
                // rows fill the lower part of the board, below the avatar's start
                let cell = Vec2::new(
                    (col as f32 + 0.5) / config.columns as f32,
                    0.25 + 0.7 * (row as f32 + 0.5) / config.rows as f32,
                );
                let jitter = Vec2::new(
                    rng.gen_range(-FLIP_ITEM_JITTER..=FLIP_ITEM_JITTER),
                    rng.gen_range(-FLIP_ITEM_JITTER..=FLIP_ITEM_JITTER),
                );
                items.push(BoardRect::new(cell + jitter, half));
            }
        }

        let mut camera = Camera::new(config.fovy_degrees, 0.1, 100.0);
        let fit = BOARD_SIZE.y * 0.5 / (camera.fovy_radians * 0.5).tan();
        camera.eye = Vec3::new(0.0, 0.0, fit * 1.1);
        camera.target = Vec3::ZERO;
        Ok(Self {
            avatar: Vec2::from(AVATAR_START),
            state: AvatarState::Idle,
            items,
            flipped: FnvHashSet::default(),
            just_entered: false,
            viewport: Viewport::default(),
            camera,
        })
    }

    pub fn avatar(&self) -> Vec2 {
        self.avatar
    }

    pub fn avatar_rect(&self) -> BoardRect {
        BoardRect::new(self.avatar, Vec2::from(AVATAR_HALF_SIZE))
    }

    pub fn state(&self) -> AvatarState {
        self.state
    }

    pub fn items(&self) -> &[BoardRect] {
        &self.items
    }

    pub fn is_flipped(&self, item: usize) -> bool {
        self.flipped.contains(&item)
    }

    pub fn flipped_count(&self) -> usize {
        self.flipped.len()
    }

    /// Canvas pixel to board coordinates, clamped to the walkable area.
    pub fn board_point(&self, px: Vec2) -> Vec2 {
        let p = px / Vec2::new(self.viewport.width, self.viewport.height);
        p.clamp(Vec2::splat(AVATAR_TARGET_MIN), Vec2::splat(AVATAR_TARGET_MAX))
    }

    /// Board coordinates to canvas pixels.
    pub fn pixel_of(&self, board: Vec2) -> Vec2 {
        board * Vec2::new(self.viewport.width, self.viewport.height)
    }

    fn flip_overlapped(&mut self) {
        let avatar = self.avatar_rect();
        for (i, item) in self.items.iter().enumerate() {
            if !self.flipped.contains(&i) && avatar.overlaps(item) {
                log::debug!("[flip] item {i} flipped");
                self.flipped.insert(i);
            }
        }
    }

    fn to_world(board: Vec2) -> Vec3 {
        Vec3::new(
            (board.x - 0.5) * BOARD_SIZE.x,
            (0.5 - board.y) * BOARD_SIZE.y,
            0.0,
        )
    }
}

impl Scene for FlipScene {
    fn update(&mut self, _time: FrameTime) {
        let AvatarState::Moving { target } = self.state else {
            return;
        };
        let gap = target - self.avatar;
        self.avatar = Vec2::new(
            smooth(self.avatar.x, target.x, AVATAR_SMOOTHING),
            smooth(self.avatar.y, target.y, AVATAR_SMOOTHING),
        );
        self.flip_overlapped();
        if gap.x.abs() < AVATAR_SNAP_EPSILON && gap.y.abs() < AVATAR_SNAP_EPSILON {
            self.avatar = target;
            self.state = AvatarState::Idle;
        }
    }

    fn handle_input(&mut self, input: &SceneInput) {
        if let SceneInput::Click { pos } = input {
            if self.just_entered {
                self.just_entered = false;
                return;
            }
            self.state = AvatarState::Moving {
                target: self.board_point(*pos),
            };
        }
    }

    fn fullscreen_entered(&mut self) {
        self.just_entered = true;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport.set(width, height);
        self.camera.set_viewport(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self, out: &mut SceneFrame) {
        *out = SceneFrame::new(rgb(0x111318));
        let face = rgb(0x4a4f5c);
        let back = rgb(0xf5c542);
        for (i, item) in self.items.iter().enumerate() {
            let color = if self.is_flipped(i) { back } else { face };
            let size = item.half.min_element() * BOARD_SIZE.y * 2.0;
            out.push(Self::to_world(item.center), size, color);
        }
        let size = Vec2::from(AVATAR_HALF_SIZE).max_element() * BOARD_SIZE.y * 2.0;
        let avatar = Self::to_world(self.avatar) + Vec3::Z * 0.1;
        out.push(avatar, size, rgb(0xf5f5f5));
        if let AvatarState::Moving { target } = self.state {
            out.push(Self::to_world(target), size * 0.4, rgb(0x6e8efb));
        }
    }

    fn label(&self) -> Option<String> {
        Some(format!("{}/{} flipped", self.flipped.len(), self.items.len()))
    }
}
