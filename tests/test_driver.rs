use summit_climb::driver::*;
use summit_climb::entities::*;
use summit_climb::error::GameError;
use summit_climb::input::HeldKeys;
use summit_climb::raster::Surface;
use summit_climb::run_state::RunPhase;
use summit_climb::worldgen::start_run;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> ClimbState {
    let mut s =
        start_run(Viewport::default(), Avatar::Man, &mut StdRng::seed_from_u64(42)).unwrap();
    s.enemies.clear();
    s
}

fn climb() -> HeldKeys {
    HeldKeys { climb: true, ..HeldKeys::default() }
}

fn surface() -> Surface {
    Surface::new(800, 600)
}

/// Fire the host's next frame into the loop.
fn tick(game: &mut GameLoop, host: &mut ManualHost, input: &HeldKeys, surface: &mut Surface) -> Snapshot {
    let frame = host.fire().expect("a frame should be scheduled");
    game.on_frame(host, frame, input, surface)
}

fn assert_no_registrations(game: &GameLoop, host: &ManualHost) {
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_listeners(), 0);
    assert!(!game.is_active());
}

#[test]
fn start_registers_one_frame_and_one_listener() {
    let mut host = ManualHost::new();
    let game = GameLoop::start(make_state(), &mut host);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.active_listeners(), 1);
    assert!(game.is_active());
}

#[test]
fn each_frame_steps_and_rearms() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut game = GameLoop::start(make_state(), &mut host);

    for n in 1..=10u32 {
        let snap = tick(&mut game, &mut host, &climb(), &mut surface);
        assert_eq!(snap.altitude, n * 2);
        assert_eq!(host.pending_frames(), 1);
    }
    assert!(!surface.labels().is_empty());
}

#[test]
fn stale_frame_is_ignored() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut game = GameLoop::start(make_state(), &mut host);

    let frame = host.fire().unwrap();
    game.on_frame(&mut host, frame, &climb(), &mut surface);
    // Same id again: already consumed.
    let snap = game.on_frame(&mut host, frame, &climb(), &mut surface);
    assert_eq!(snap.altitude, 2);
    assert_eq!(game.state().tick, 1);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn checkpoint_pauses_simulation_but_keeps_rendering() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut game = GameLoop::start(make_state(), &mut host);

    for _ in 0..161 {
        tick(&mut game, &mut host, &climb(), &mut surface);
    }
    assert_eq!(game.phase(), RunPhase::CheckpointOpen(0));

    for _ in 0..20 {
        let snap = tick(&mut game, &mut host, &climb(), &mut surface);
        assert_eq!(snap.altitude, 322);
        assert_eq!(host.pending_frames(), 1);
    }
    assert!(surface.labels().iter().any(|l| l.text == Avatar::Man.glyph()));

    game.acknowledge().unwrap();
    let snap = tick(&mut game, &mut host, &climb(), &mut surface);
    assert_eq!(snap.altitude, 324);
}

#[test]
fn acknowledge_outside_checkpoint_is_rejected() {
    let mut host = ManualHost::new();
    let mut game = GameLoop::start(make_state(), &mut host);
    assert!(matches!(
        game.acknowledge(),
        Err(GameError::InvalidTransition { from: RunPhase::Running, .. })
    ));
}

#[test]
fn winning_releases_frame_and_listener() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut state = make_state();
    for checkpoint in &mut state.checkpoints {
        checkpoint.reached = true;
    }
    state.checkpoints_reached = 7;
    state.altitude = MOUNTAIN_HEIGHT - 2.0;
    state.camera.y = MOUNTAIN_HEIGHT - 2.0;

    let mut game = GameLoop::start(state, &mut host);
    tick(&mut game, &mut host, &climb(), &mut surface);

    assert_eq!(game.phase(), RunPhase::Won);
    assert_no_registrations(&game, &host);
    assert!(host.fire().is_none());
}

#[test]
fn losing_releases_frame_and_listener() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut state = make_state();
    state.player.health = 1;
    state.enemies.push(Enemy::new(400.0, 500.0));

    let mut game = GameLoop::start(state, &mut host);
    let snap = tick(&mut game, &mut host, &HeldKeys::default(), &mut surface);

    assert_eq!(snap.health, 0);
    assert_eq!(game.phase(), RunPhase::Lost);
    assert_no_registrations(&game, &host);
}

#[test]
fn teardown_is_idempotent_and_stops_ticks() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut game = GameLoop::start(make_state(), &mut host);
    let frame = host.fire().unwrap();

    game.teardown(&mut host);
    game.teardown(&mut host);
    assert_no_registrations(&game, &host);

    // A frame delivered after teardown must not advance the dead run.
    let snap = game.on_frame(&mut host, frame, &climb(), &mut surface);
    assert_eq!(snap.altitude, 0);
    assert_eq!(game.state().tick, 0);
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn teardown_cancels_an_unfired_frame() {
    let mut host = ManualHost::new();
    let mut game = GameLoop::start(make_state(), &mut host);
    game.teardown(&mut host);
    assert_no_registrations(&game, &host);
}

#[test]
fn restart_swaps_in_a_fresh_run_without_leaks() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut game = GameLoop::start(make_state(), &mut host);
    for _ in 0..50 {
        tick(&mut game, &mut host, &climb(), &mut surface);
    }
    assert_eq!(game.state().snapshot.altitude, 100);

    game.restart(&mut host, make_state());
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.active_listeners(), 1);
    assert_eq!(game.state().altitude, 0.0);

    let snap = tick(&mut game, &mut host, &climb(), &mut surface);
    assert_eq!(snap.altitude, 2);
}

#[test]
fn restart_after_loss_rearms_the_loop() {
    let mut host = ManualHost::new();
    let mut surface = surface();
    let mut state = make_state();
    state.player.health = 1;
    state.enemies.push(Enemy::new(400.0, 500.0));
    let mut game = GameLoop::start(state, &mut host);
    tick(&mut game, &mut host, &HeldKeys::default(), &mut surface);
    assert_no_registrations(&game, &host);

    game.restart(&mut host, make_state());
    assert_eq!(game.phase(), RunPhase::Running);
    assert_eq!(game.state().player.health, 3);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.active_listeners(), 1);
}
