//! Paints a `ClimbState` into a `Surface`, camera-relative.
//!
//! Observational only: nothing here feeds back into the simulation.

use crate::entities::{Checkpoint, ClimbState, Enemy, Rock, TerrainBlock, MOUNTAIN_HEIGHT};
use crate::raster::{Rgb, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY_TOP: Rgb = Rgb::hex(0x87CEEB);
const C_SKY_BOTTOM: Rgb = Rgb::hex(0xE0F6FF);
const C_FOOTHILL: Rgb = Rgb::hex(0x8B4513);
const C_RIDGE: Rgb = Rgb::hex(0xA0522D);
const C_CLIFF: Rgb = Rgb::hex(0x696969);
const C_SNOWCAP: Rgb = Rgb::hex(0xD3D3D3);
const C_SUMMIT: Rgb = Rgb::hex(0xFFD700);
const C_FLAGPOLE: Rgb = Rgb::hex(0x654321);
const C_FLAG: Rgb = Rgb::hex(0xFF4444);
const C_ENEMY: Rgb = Rgb::hex(0x2ECC40);
const C_BAR_EMPTY: Rgb = Rgb::hex(0xFF0000);
const C_BAR_FULL: Rgb = Rgb::hex(0x00FF00);
const C_ATTACK: Rgb = Rgb::hex(0xFFFF00);

const OUTLINE_ALPHA: f32 = 0.3;
const ATTACK_ALPHA: f32 = 0.4;
pub const ATTACK_RADIUS: f32 = 50.0;
const HEALTH_BAR_WIDTH: f32 = 35.0;

/// Terrain and checkpoints further than this off-screen are skipped.
const CULL_MARGIN: f32 = 100.0;
const ENEMY_CULL_MARGIN: f32 = 50.0;

pub const SUMMIT_BANNER: &str = "🏔️ SUMMIT! 🏔️";
pub const CHECKPOINT_DONE: &str = "✅";
pub const ENEMY_GLYPH: &str = "👾";

pub fn rock_color(rock: Rock) -> Rgb {
    match rock {
        Rock::Foothill => C_FOOTHILL,
        Rock::Ridge => C_RIDGE,
        Rock::Cliff => C_CLIFF,
        Rock::Snowcap => C_SNOWCAP,
        Rock::Summit => C_SUMMIT,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render(state: &ClimbState, surface: &mut Surface) {
    surface.clear_gradient(C_SKY_TOP, C_SKY_BOTTOM);
    let height = surface.height() as f32;
    let visible = |screen_y: f32, margin: f32| screen_y > -margin && screen_y < height + margin;

    for block in &state.terrain {
        let screen_y = state.camera.to_screen(block.y);
        if visible(screen_y, CULL_MARGIN) {
            draw_block(surface, block, screen_y);
        }
    }

    for checkpoint in &state.checkpoints {
        let screen_y = state.camera.to_screen(checkpoint.y);
        if visible(screen_y, CULL_MARGIN) {
            draw_checkpoint(surface, checkpoint, screen_y);
        }
    }

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        let screen_y = state.camera.to_screen(enemy.y);
        if visible(screen_y, ENEMY_CULL_MARGIN) {
            draw_enemy(surface, enemy, screen_y);
        }
    }

    draw_player(surface, state);

    if state.altitude > MOUNTAIN_HEIGHT - 500.0 {
        let x = surface.width() as f32 / 2.0 - 110.0;
        surface.text(x, 60.0, SUMMIT_BANNER, C_SUMMIT);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_block(surface: &mut Surface, block: &TerrainBlock, screen_y: f32) {
    surface.fill_rect(block.x, screen_y, block.width, block.height, rock_color(block.rock));
    surface.stroke_rect(block.x, screen_y, block.width, block.height, Rgb::BLACK, OUTLINE_ALPHA);
}

fn draw_checkpoint(surface: &mut Surface, checkpoint: &Checkpoint, screen_y: f32) {
    let x = checkpoint.x;
    if checkpoint.reached {
        surface.text(x, screen_y - 20.0, CHECKPOINT_DONE, Rgb::WHITE);
        return;
    }

    // Pole, pennant, then the habit number on the pennant.
    surface.fill_rect(x, screen_y - 60.0, 5.0, 80.0, C_FLAGPOLE);
    surface.fill_triangle(
        (x + 5.0, screen_y - 60.0),
        (x + 45.0, screen_y - 45.0),
        (x + 5.0, screen_y - 30.0),
        C_FLAG,
    );
    surface.text(x + 18.0, screen_y - 40.0, (checkpoint.index + 1).to_string(), Rgb::WHITE);
}

fn draw_enemy(surface: &mut Surface, enemy: &Enemy, screen_y: f32) {
    surface.fill_rect(enemy.x, screen_y, enemy.width, enemy.height, C_ENEMY);
    surface.text(enemy.x, screen_y + 28.0, ENEMY_GLYPH, Rgb::WHITE);

    let ratio = (enemy.health as f32 / enemy.max_health.max(1) as f32).clamp(0.0, 1.0);
    surface.fill_rect(enemy.x, screen_y - 8.0, HEALTH_BAR_WIDTH, 4.0, C_BAR_EMPTY);
    surface.fill_rect(enemy.x, screen_y - 8.0, HEALTH_BAR_WIDTH * ratio, 4.0, C_BAR_FULL);
}

fn draw_player(surface: &mut Surface, state: &ClimbState) {
    let p = &state.player;
    surface.text(p.x, p.y + 35.0, state.avatar.glyph(), Rgb::WHITE);

    if p.attacking {
        surface.blend_circle(
            p.x + p.width / 2.0,
            p.y + p.height / 2.0,
            ATTACK_RADIUS,
            C_ATTACK,
            ATTACK_ALPHA,
        );
    }
}
