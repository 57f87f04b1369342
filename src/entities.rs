//! All climb entity types. Pure data, no logic.
//!
//! The simulation step in `compute` and the renderer in `render` act on
//! these records from the outside.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::run_state::RunPhase;

/// Total climb height in world units.  Reaching it with every checkpoint
/// ticked off wins the run.
pub const MOUNTAIN_HEIGHT: f32 = 3500.0;

/// Number of narrative checkpoints on every mountain.
pub const CHECKPOINT_COUNT: usize = 7;

pub const PLAYER_START_HEALTH: i32 = 3;
pub const ENEMY_MAX_HEALTH: i32 = 100;

// ── Avatar ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    Man,
    Girl,
    Dog,
}

impl Avatar {
    pub const ALL: [Avatar; 3] = [Avatar::Man, Avatar::Girl, Avatar::Dog];

    pub fn glyph(self) -> &'static str {
        match self {
            Avatar::Man => "🧑",
            Avatar::Girl => "👧",
            Avatar::Dog => "🐕",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Avatar::Man => "man",
            Avatar::Girl => "girl",
            Avatar::Dog => "dog",
        }
    }
}

impl FromStr for Avatar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "man" => Ok(Avatar::Man),
            "girl" => Ok(Avatar::Girl),
            "dog" => Ok(Avatar::Dog),
            other => Err(format!("unknown avatar '{other}' (expected man, girl or dog)")),
        }
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Logical size of the raster the mountain is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

impl Viewport {
    /// World y of the mountain's foot; every altitude is measured up from here.
    pub fn ground_y(&self) -> f32 {
        self.height as f32 - 100.0
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Colour bucket of a terrain block, picked from its altitude band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rock {
    Foothill,
    Ridge,
    Cliff,
    Snowcap,
    /// The gold capping row at the very top.
    Summit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rock: Rock,
}

// ── Player, camera, enemies, checkpoints ──────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    /// Fixed screen row; climbing moves the camera, not the player.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub climb_speed: f32,
    /// Mirrors the held action key, rewritten every tick.
    pub attacking: bool,
    pub health: i32,
}

impl Player {
    pub fn spawn(viewport: Viewport) -> Self {
        Player {
            x: viewport.width as f32 / 2.0,
            y: viewport.ground_y(),
            width: 40.0,
            height: 40.0,
            speed: 3.0,
            climb_speed: 2.0,
            attacking: false,
            health: PLAYER_START_HEALTH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    pub fn to_screen(&self, world_y: f32) -> f32 {
        world_y + self.y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    pub health: i32,
    pub max_health: i32,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Enemy {
            x,
            y,
            width: 35.0,
            height: 35.0,
            alive: true,
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub reached: bool,
    /// Position in the guidebook, 0..7.
    pub index: usize,
}

// ── Observable snapshot ───────────────────────────────────────────────────────

/// What the surrounding UI sees after every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub altitude: u32,
    pub checkpoints_reached: u8,
    pub health: i32,
}

// ── Master climb state ────────────────────────────────────────────────────────

/// Everything one run owns.  Created whole on avatar selection and thrown
/// away whole on win or restart.
#[derive(Clone, Debug, PartialEq)]
pub struct ClimbState {
    pub viewport: Viewport,
    pub avatar: Avatar,
    pub player: Player,
    pub camera: Camera,
    pub altitude: f32,
    pub terrain: Vec<TerrainBlock>,
    pub enemies: Vec<Enemy>,
    pub checkpoints: Vec<Checkpoint>,
    pub checkpoints_reached: u8,
    pub phase: RunPhase,
    pub tick: u64,
    pub snapshot: Snapshot,
}
