//! Procedural mountain: terrain rows, enemy placements and checkpoints.
//!
//! All randomness comes through the injected `rng`, so a seeded generator
//! pins the whole layout while production runs get a fresh mountain.

use rand::Rng;
use tracing::info;

use crate::entities::{
    Avatar, Camera, Checkpoint, ClimbState, Enemy, Player, Rock, Snapshot, TerrainBlock, Viewport,
    CHECKPOINT_COUNT, MOUNTAIN_HEIGHT,
};
use crate::error::GameError;
use crate::run_state::{RunPhase, Trigger};

pub const BLOCK_WIDTH: f32 = 40.0;
pub const ROW_SPACING: f32 = 35.0;
pub const FIRST_ENEMY_ALTITUDE: f32 = 300.0;
pub const ENEMY_SPACING: f32 = 250.0;

/// Altitudes at which the seven checkpoints sit, in guidebook order.
pub const CHECKPOINT_ALTITUDES: [f32; CHECKPOINT_COUNT] =
    [400.0, 800.0, 1200.0, 1700.0, 2200.0, 2700.0, 3200.0];

/// Horizontal margin enemies keep from either mountain edge.
const ENEMY_MARGIN: f32 = 100.0;

#[derive(Clone, Debug)]
pub struct Terrain {
    pub blocks: Vec<TerrainBlock>,
    pub enemies: Vec<Enemy>,
    pub checkpoints: Vec<Checkpoint>,
}

// ── Generators ────────────────────────────────────────────────────────────────

pub fn generate(viewport: Viewport, rng: &mut impl Rng) -> Terrain {
    Terrain {
        blocks: generate_blocks(viewport, rng),
        enemies: generate_enemies(viewport, rng),
        checkpoints: generate_checkpoints(viewport),
    }
}

/// Colour band for a terrain row at world `y`.
pub fn rock_for(y: f32) -> Rock {
    if y > 200.0 {
        Rock::Foothill
    } else if y > -500.0 {
        Rock::Ridge
    } else if y > -1500.0 {
        Rock::Cliff
    } else {
        Rock::Snowcap
    }
}

fn row_columns(viewport: Viewport) -> impl Iterator<Item = f32> {
    (0..viewport.width)
        .step_by(BLOCK_WIDTH as usize)
        .map(|x| x as f32)
}

fn generate_blocks(viewport: Viewport, rng: &mut impl Rng) -> Vec<TerrainBlock> {
    let mut blocks = Vec::new();
    let mut y = viewport.ground_y();

    while y > -MOUNTAIN_HEIGHT {
        for x in row_columns(viewport) {
            blocks.push(TerrainBlock {
                x,
                y,
                width: BLOCK_WIDTH,
                height: rng.gen_range(30.0..50.0),
                rock: rock_for(y),
            });
        }
        y -= ROW_SPACING;
    }

    // Gold capping row marks the summit.
    for x in row_columns(viewport) {
        blocks.push(TerrainBlock {
            x,
            y: -MOUNTAIN_HEIGHT,
            width: BLOCK_WIDTH,
            height: 50.0,
            rock: Rock::Summit,
        });
    }

    blocks
}

fn generate_enemies(viewport: Viewport, rng: &mut impl Rng) -> Vec<Enemy> {
    let min_x = ENEMY_MARGIN;
    let max_x = (viewport.width as f32 - ENEMY_MARGIN).max(min_x + 1.0);

    let mut enemies = Vec::new();
    let mut altitude = FIRST_ENEMY_ALTITUDE;
    while altitude < MOUNTAIN_HEIGHT {
        let x = rng.gen_range(min_x..max_x);
        enemies.push(Enemy::new(x, viewport.ground_y() - altitude));
        altitude += ENEMY_SPACING;
    }
    enemies
}

fn generate_checkpoints(viewport: Viewport) -> Vec<Checkpoint> {
    CHECKPOINT_ALTITUDES
        .iter()
        .enumerate()
        .map(|(index, altitude)| Checkpoint {
            x: viewport.width as f32 / 2.0,
            y: viewport.ground_y() - altitude,
            width: 60.0,
            height: 80.0,
            reached: false,
            index,
        })
        .collect()
}

// ── Run construction ──────────────────────────────────────────────────────────

/// Build a fresh run for the chosen avatar: the Idle → Running transition.
pub fn start_run(
    viewport: Viewport,
    avatar: Avatar,
    rng: &mut impl Rng,
) -> Result<ClimbState, GameError> {
    let phase = RunPhase::Idle.transition(Trigger::AvatarSelected)?;
    let terrain = generate(viewport, rng);
    let player = Player::spawn(viewport);

    info!(
        avatar = avatar.name(),
        blocks = terrain.blocks.len(),
        enemies = terrain.enemies.len(),
        checkpoints = terrain.checkpoints.len(),
        "Generated mountain for new climb"
    );

    Ok(ClimbState {
        viewport,
        avatar,
        snapshot: Snapshot {
            altitude: 0,
            checkpoints_reached: 0,
            health: player.health,
        },
        player,
        camera: Camera::default(),
        altitude: 0.0,
        terrain: terrain.blocks,
        enemies: terrain.enemies,
        checkpoints: terrain.checkpoints,
        checkpoints_reached: 0,
        phase,
        tick: 0,
    })
}
