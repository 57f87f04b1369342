use summit_climb::entities::*;
use summit_climb::run_state::RunPhase;
use summit_climb::worldgen::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn make_terrain() -> Terrain {
    generate(Viewport::default(), &mut seeded_rng(42))
}

#[test]
fn same_seed_same_mountain() {
    let a = generate(Viewport::default(), &mut seeded_rng(9));
    let b = generate(Viewport::default(), &mut seeded_rng(9));
    assert_eq!(a.blocks, b.blocks);
    assert_eq!(a.enemies, b.enemies);
}

#[test]
fn different_seeds_move_enemies() {
    let a = generate(Viewport::default(), &mut seeded_rng(1));
    let b = generate(Viewport::default(), &mut seeded_rng(2));
    assert_ne!(a.enemies, b.enemies);
}

// ── Terrain ───────────────────────────────────────────────────────────────────

#[test]
fn terrain_rows_span_ground_to_summit() {
    let t = make_terrain();
    // Rows at 500, 465, ... while y > -3500 → 115 rows of 20 blocks, plus the cap.
    assert_eq!(t.blocks.len(), 115 * 20 + 20);

    let first = &t.blocks[0];
    assert_eq!((first.x, first.y), (0.0, 500.0));
    assert!(t.blocks.iter().all(|b| b.width == BLOCK_WIDTH));
    assert!(t.blocks.iter().all(|b| b.x < 800.0 && b.x % 40.0 == 0.0));
}

#[test]
fn block_heights_are_randomized_within_range() {
    let t = make_terrain();
    for block in t.blocks.iter().filter(|b| b.rock != Rock::Summit) {
        assert!(block.height >= 30.0 && block.height < 50.0, "height {}", block.height);
    }
}

#[test]
fn summit_cap_is_gold_at_full_height() {
    let t = make_terrain();
    let cap: Vec<_> = t.blocks.iter().filter(|b| b.rock == Rock::Summit).collect();
    assert_eq!(cap.len(), 20);
    assert!(cap.iter().all(|b| b.y == -MOUNTAIN_HEIGHT && b.height == 50.0));
}

#[test]
fn rock_bands_follow_altitude() {
    assert_eq!(rock_for(500.0), Rock::Foothill);
    assert_eq!(rock_for(200.0), Rock::Ridge);
    assert_eq!(rock_for(-499.0), Rock::Ridge);
    assert_eq!(rock_for(-500.0), Rock::Cliff);
    assert_eq!(rock_for(-1500.0), Rock::Snowcap);
    assert_eq!(rock_for(-3400.0), Rock::Snowcap);

    let t = make_terrain();
    for block in t.blocks.iter().filter(|b| b.rock != Rock::Summit) {
        assert_eq!(block.rock, rock_for(block.y));
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn one_enemy_per_band() {
    let t = make_terrain();
    // 300, 550, ..., 3300
    assert_eq!(t.enemies.len(), 13);
    for (i, enemy) in t.enemies.iter().enumerate() {
        let altitude = FIRST_ENEMY_ALTITUDE + ENEMY_SPACING * i as f32;
        assert_eq!(enemy.y, 500.0 - altitude);
        assert!(enemy.x >= 100.0 && enemy.x < 700.0);
        assert!(enemy.alive);
        assert_eq!(enemy.health, 100);
    }
}

// ── Checkpoints ───────────────────────────────────────────────────────────────

#[test]
fn seven_checkpoints_on_the_centre_column() {
    let t = make_terrain();
    assert_eq!(t.checkpoints.len(), CHECKPOINT_COUNT);
    for (i, checkpoint) in t.checkpoints.iter().enumerate() {
        assert_eq!(checkpoint.index, i);
        assert_eq!(checkpoint.x, 400.0);
        assert_eq!(checkpoint.y, 500.0 - CHECKPOINT_ALTITUDES[i]);
        assert!(!checkpoint.reached);
    }
}

// ── start_run ─────────────────────────────────────────────────────────────────

#[test]
fn start_run_builds_a_running_climb() {
    let s = start_run(Viewport::default(), Avatar::Girl, &mut seeded_rng(3)).unwrap();
    assert_eq!(s.phase, RunPhase::Running);
    assert_eq!(s.avatar, Avatar::Girl);
    assert_eq!(s.altitude, 0.0);
    assert_eq!(s.camera.y, 0.0);
    assert_eq!(s.checkpoints_reached, 0);
    assert_eq!(s.snapshot, Snapshot { altitude: 0, checkpoints_reached: 0, health: 3 });
    assert_eq!(s.checkpoints.len(), 7);
    assert_eq!(s.enemies.len(), 13);
}

#[test]
fn narrower_viewport_scales_layout() {
    let viewport = Viewport { width: 400, height: 300 };
    let t = generate(viewport, &mut seeded_rng(5));
    assert!(t.checkpoints.iter().all(|c| c.x == 200.0));
    assert!(t.enemies.iter().all(|e| e.x >= 100.0 && e.x < 300.0));
    assert_eq!(t.blocks[0].y, 200.0);
}
