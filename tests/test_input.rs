use crossterm::event::KeyCode;
use summit_climb::config::GameConfig;
use summit_climb::input::*;

#[test]
fn press_and_release() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Up, KeyTarget::Game);
    assert!(t.held().climb);
    t.release(KeyCode::Up, KeyTarget::Game);
    assert!(!t.held().climb);
}

#[test]
fn all_bindings_map_to_held_keys() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Char('a'), KeyTarget::Game);
    t.press(KeyCode::Right, KeyTarget::Game);
    t.press(KeyCode::Char('w'), KeyTarget::Game);
    t.press(KeyCode::Char(' '), KeyTarget::Game);
    assert_eq!(
        t.held(),
        HeldKeys { left: true, right: true, climb: true, attack: true }
    );
}

#[test]
fn shifted_letters_count_as_the_same_key() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Char('D'), KeyTarget::Game);
    assert!(t.held().right);
    t.release(KeyCode::Char('d'), KeyTarget::Game);
    assert!(!t.held().right);
}

#[test]
fn text_input_events_are_ignored() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Char(' '), KeyTarget::TextInput);
    t.press(KeyCode::Left, KeyTarget::TextInput);
    assert_eq!(t.held(), HeldKeys::default());

    // A release typed into a field does not release a held game key.
    t.press(KeyCode::Up, KeyTarget::Game);
    t.release(KeyCode::Up, KeyTarget::TextInput);
    assert!(t.held().climb);
}

#[test]
fn hold_window_expires_silent_keys() {
    let mut t = InputTracker::new(Some(8));
    t.press(KeyCode::Up, KeyTarget::Game);
    for _ in 0..8 {
        t.advance_frame();
    }
    assert!(t.is_held(KeyCode::Up));
    t.advance_frame();
    assert!(!t.is_held(KeyCode::Up));
}

#[test]
fn repeats_keep_a_key_alive() {
    let mut t = InputTracker::new(Some(4));
    t.press(KeyCode::Char(' '), KeyTarget::Game);
    for _ in 0..40 {
        t.advance_frame();
        t.press(KeyCode::Char(' '), KeyTarget::Game);
    }
    assert!(t.held().attack);
}

#[test]
fn without_window_keys_stay_held_until_released() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Left, KeyTarget::Game);
    for _ in 0..1000 {
        t.advance_frame();
    }
    assert!(t.held().left);
}

#[test]
fn clear_forgets_everything() {
    let mut t = InputTracker::new(None);
    t.press(KeyCode::Left, KeyTarget::Game);
    t.press(KeyCode::Up, KeyTarget::Game);
    t.clear();
    assert_eq!(t.held(), HeldKeys::default());
}

#[test]
fn release_reporting_host_keeps_silent_keys_held() {
    let config = GameConfig::default().with_release_events(true);
    assert_eq!(config.hold_window, None);

    let mut t = InputTracker::new(config.hold_window);
    t.press(KeyCode::Up, KeyTarget::Game);
    // OS key-repeat takes far longer than the default window to start.
    for _ in 0..30 {
        t.advance_frame();
        assert!(t.held().climb);
    }
    t.release(KeyCode::Up, KeyTarget::Game);
    assert!(!t.held().climb);
}

#[test]
fn press_only_host_keeps_the_hold_window() {
    let config = GameConfig::default().with_release_events(false);
    assert_eq!(config.hold_window, GameConfig::default().hold_window);
}
